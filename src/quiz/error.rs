use thiserror::Error;

use crate::quiz::Phase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Number of questions cannot be higher than the upper range.")]
    TooManyQuestions { question_count: u32, available: u32 },
    #[error("Choose at least one question.")]
    NoQuestions,
    #[error("The upper range must be between {min} and {max}, got {upper_bound}.")]
    UpperBoundOutOfRange { upper_bound: u32, min: u32, max: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot {operation} while the quiz is {phase:?}")]
    OutOfPhase { operation: &'static str, phase: Phase },
}
