#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::QuizError;
pub use model::validate_respondent;
pub use session::{QuizProgress, QuizSession, SessionState};
pub use time::Clock;
