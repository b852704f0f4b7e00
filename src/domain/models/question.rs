#[cfg(test)]
#[path = "question_test.rs"]
mod tests;

use std::ops::Index;

use serde::Deserialize;
use serde::Serialize;

use super::QuizError;

pub const ANSWERS_PER_QUESTION: usize = 4;

/// Wire shape of a single question as written by a generator.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_index: usize,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: [String; ANSWERS_PER_QUESTION],
    correct_index: usize,
}

impl Question {
    /// Validates a generated question. `number` is the 1-based position used
    /// in error messages.
    pub fn new(
        number: usize,
        text: &str,
        answers: Vec<String>,
        correct_index: usize,
    ) -> Result<Question, QuizError> {
        if text.trim().is_empty() {
            return Err(QuizError::BlankQuestion { number });
        }

        let count = answers.len();
        let answers: [String; ANSWERS_PER_QUESTION] = answers
            .try_into()
            .map_err(|_| return QuizError::AnswerCount { number, count })?;

        if correct_index >= ANSWERS_PER_QUESTION {
            return Err(QuizError::CorrectIndexOutOfRange {
                number,
                index: correct_index,
            });
        }

        return Ok(Question {
            text: text.trim().to_string(),
            answers,
            correct_index,
        });
    }

    pub fn from_payload(number: usize, payload: QuestionPayload) -> Result<Question, QuizError> {
        return Question::new(
            number,
            &payload.question,
            payload.answers,
            payload.correct_index,
        );
    }

    pub fn text(&self) -> &str {
        return &self.text;
    }

    pub fn answers(&self) -> &[String; ANSWERS_PER_QUESTION] {
        return &self.answers;
    }

    pub fn correct_index(&self) -> usize {
        return self.correct_index;
    }

    pub fn is_correct(&self, answer_index: usize) -> bool {
        return answer_index == self.correct_index;
    }
}

/// Ordered questions for one session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<QuestionSet, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        return Ok(QuestionSet { questions });
    }

    pub fn len(&self) -> usize {
        return self.questions.len();
    }

    // Always false, kept for clippy's len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        return self.questions.is_empty();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        return self.questions.iter();
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        return &self.questions[index];
    }
}
