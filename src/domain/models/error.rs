use thiserror::Error;

/// Validation failures for generated quiz content.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a topic is required to generate questions")]
    EmptyTopic,
    #[error("the generator returned an empty response")]
    EmptyResponse,
    #[error("the generator returned no questions")]
    NoQuestions,
    #[error("question {number} has {count} answers, expected 4")]
    AnswerCount { number: usize, count: usize },
    #[error("question {number} marks answer {index} as correct, but only 4 answers exist")]
    CorrectIndexOutOfRange { number: usize, index: usize },
    #[error("question {number} has no text")]
    BlankQuestion { number: usize },
}
