mod answer;
mod question;
mod respondent;
mod result;

pub use answer::{AnswerSlot, AnswerSlots, OptionIndex};
pub use question::{AnswerKey, OPTION_COUNT, QUESTION_COUNT, Question, QuestionBank};
pub use respondent::{Respondent, RespondentError, validate_respondent};
pub use result::{ResultRecord, Score};
