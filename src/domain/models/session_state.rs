#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use std::sync::Arc;

use super::Question;
use super::QuestionSet;
use super::ANSWERS_PER_QUESTION;

/// How an answer option should be presented for the current question.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnswerMark {
    /// Nothing selected yet.
    Unanswered,
    /// The right answer, revealed once any selection exists.
    Correct,
    /// Selected, but not the right answer.
    Wrong,
    Other,
}

impl AnswerMark {
    pub fn classify(question: &Question, selected: Option<usize>, option: usize) -> AnswerMark {
        let Some(selected) = selected else {
            return AnswerMark::Unanswered;
        };

        if question.is_correct(option) {
            return AnswerMark::Correct;
        }
        if option == selected {
            return AnswerMark::Wrong;
        }

        return AnswerMark::Other;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizProgress {
    questions: Arc<QuestionSet>,
    current_index: usize,
    score: usize,
    selected_answer: Option<usize>,
}

impl QuizProgress {
    pub fn start(questions: Arc<QuestionSet>) -> QuizProgress {
        return QuizProgress {
            questions,
            current_index: 0,
            score: 0,
            selected_answer: None,
        };
    }

    pub fn current_index(&self) -> usize {
        return self.current_index;
    }

    pub fn score(&self) -> usize {
        return self.score;
    }

    pub fn selected_answer(&self) -> Option<usize> {
        return self.selected_answer;
    }

    pub fn current_question(&self) -> &Question {
        return &self.questions[self.current_index];
    }

    pub fn total(&self) -> usize {
        return self.questions.len();
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> usize {
        return self.current_index + 1;
    }

    pub fn progress_ratio(&self) -> f64 {
        return self.question_number() as f64 / self.total() as f64;
    }

    pub fn is_last_question(&self) -> bool {
        return self.current_index + 1 >= self.total();
    }

    pub fn is_answered(&self) -> bool {
        return self.selected_answer.is_some();
    }

    pub fn is_selection_correct(&self) -> Option<bool> {
        return self
            .selected_answer
            .map(|idx| return self.current_question().is_correct(idx));
    }

    pub fn answer_marks(&self) -> [AnswerMark; ANSWERS_PER_QUESTION] {
        let question = self.current_question();
        return std::array::from_fn(|option| {
            return AnswerMark::classify(question, self.selected_answer, option);
        });
    }

    fn answered(&self, answer_index: usize) -> Option<QuizProgress> {
        if self.selected_answer.is_some() {
            return None;
        }

        let mut score = self.score;
        if self.current_question().is_correct(answer_index) {
            score += 1;
        }

        return Some(QuizProgress {
            questions: Arc::clone(&self.questions),
            current_index: self.current_index,
            score,
            selected_answer: Some(answer_index),
        });
    }

    fn advanced(&self) -> SessionState {
        let next_index = self.current_index + 1;
        if next_index < self.total() {
            return SessionState::InProgress(QuizProgress {
                questions: Arc::clone(&self.questions),
                current_index: next_index,
                score: self.score,
                selected_answer: None,
            });
        }

        return SessionState::GameOver(QuizResult {
            questions: Arc::clone(&self.questions),
            score: self.score,
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
    questions: Arc<QuestionSet>,
    score: usize,
}

impl QuizResult {
    pub fn questions(&self) -> &Arc<QuestionSet> {
        return &self.questions;
    }

    pub fn score(&self) -> usize {
        return self.score;
    }

    pub fn total(&self) -> usize {
        return self.questions.len();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    InProgress(QuizProgress),
    GameOver(QuizResult),
    Failed(String),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => return "idle",
            SessionState::Loading => return "loading",
            SessionState::InProgress(_) => return "in-progress",
            SessionState::GameOver(_) => return "game-over",
            SessionState::Failed(_) => return "failed",
        }
    }

    /// State after submitting `answer_index`, or `None` when the command does
    /// not apply.
    pub fn submit_answer(&self, answer_index: usize) -> Option<SessionState> {
        match self {
            SessionState::InProgress(progress) => {
                return progress
                    .answered(answer_index)
                    .map(SessionState::InProgress);
            }
            SessionState::Idle
            | SessionState::Loading
            | SessionState::GameOver(_)
            | SessionState::Failed(_) => return None,
        }
    }

    /// State after moving past the current question, or `None` when the
    /// command does not apply.
    pub fn advance(&self) -> Option<SessionState> {
        match self {
            SessionState::InProgress(progress) => return Some(progress.advanced()),
            SessionState::Idle
            | SessionState::Loading
            | SessionState::GameOver(_)
            | SessionState::Failed(_) => return None,
        }
    }
}
