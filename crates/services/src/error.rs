//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;
use storage::StorageError;

use crate::quiz::QuizSubmission;

/// Errors emitted by `QuizService` outside of submission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("quiz has not been submitted yet")]
    NotSubmitted,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService::submit`.
///
/// A persistence failure still carries the computed submission so the score
/// can be shown to the respondent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("score computed but not saved: {source}")]
    Persistence {
        submission: QuizSubmission,
        #[source]
        source: StorageError,
    },
}

impl SubmitError {
    /// The computed result, if the failure happened after scoring.
    #[must_use]
    pub fn submission(&self) -> Option<&QuizSubmission> {
        match self {
            SubmitError::Persistence { submission, .. } => Some(submission),
            _ => None,
        }
    }
}
