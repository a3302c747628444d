mod run;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use run::{QuizRun, QuizSubmission};
pub use view::{OptionView, QuestionView};
pub use workflow::QuizService;
