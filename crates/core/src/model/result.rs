use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::question::QUESTION_COUNT;
use crate::model::respondent::Respondent;

/// Number of correct answers out of the bank size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawScore")]
pub struct Score {
    correct: u8,
    total: u8,
}

#[derive(Deserialize)]
struct RawScore {
    correct: u8,
    total: u8,
}

impl From<RawScore> for Score {
    fn from(raw: RawScore) -> Self {
        Self::new(raw.correct, raw.total)
    }
}

impl Score {
    #[allow(clippy::cast_possible_truncation)]
    pub const MAX: u8 = QUESTION_COUNT as u8;

    /// `correct` is clamped to `total`.
    #[must_use]
    pub fn new(correct: u8, total: u8) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u8 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u8 {
        self.total
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Outcome of one completed session, written once to the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    respondent: Respondent,
    score: Score,
}

impl ResultRecord {
    #[must_use]
    pub fn new(respondent: Respondent, score: Score) -> Self {
        Self { respondent, score }
    }

    #[must_use]
    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Serialized log form, newline included:
    /// `ID: <id>, Name: <name>, Score: <correct>/5`.
    #[must_use]
    pub fn to_log_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Score: {}/{}",
            self.respondent.id(),
            self.respondent.name(),
            self.score.correct(),
            Score::MAX
        )
    }
}
