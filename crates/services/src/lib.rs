#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::{QuizServiceError, SubmitError};
pub use quiz::{OptionView, QuestionView, QuizRun, QuizService, QuizSubmission};
