use thiserror::Error;

use crate::model::RespondentError;

/// Errors raised by the quiz domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Respondent(#[from] RespondentError),

    #[error("option index {index} is out of range")]
    InvalidOption { index: i64 },

    #[error("quiz is not in progress")]
    NotInProgress,

    #[error("answers can only be submitted from the last question")]
    NotOnLastQuestion,

    #[error("quiz already submitted")]
    AlreadyCompleted,
}
