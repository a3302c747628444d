use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QuizError;
use crate::model::question::{OPTION_COUNT, QUESTION_COUNT};

//
// ─── OPTION INDEX ─────────────────────────────────────────────────────────────
//

/// Zero-based index of an option within a question, always `< OPTION_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    pub const FIRST: Self = Self(0);
    pub const SECOND: Self = Self(1);
    pub const THIRD: Self = Self(2);

    /// Creates a validated option index.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` if `index` is not below `OPTION_COUNT`.
    pub fn new(index: usize) -> Result<Self, QuizError> {
        u8::try_from(index)
            .ok()
            .filter(|value| usize::from(*value) < OPTION_COUNT)
            .map(Self)
            .ok_or(QuizError::InvalidOption {
                index: i64::try_from(index).unwrap_or(i64::MAX),
            })
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    /// All valid option indices in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::FIRST, Self::SECOND, Self::THIRD].into_iter()
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = QuizError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value))
    }
}

impl From<OptionIndex> for u8 {
    fn from(index: OptionIndex) -> Self {
        index.0
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── ANSWER SLOT ──────────────────────────────────────────────────────────────
//

/// The stored choice for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Chosen(OptionIndex),
}

impl AnswerSlot {
    /// Raw value used by the unanswered sentinel.
    pub const UNANSWERED_RAW: i64 = -1;

    /// Converts the numeric form (`-1` or an option index) to a slot.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` for any other value.
    pub fn from_raw(raw: i64) -> Result<Self, QuizError> {
        if raw == Self::UNANSWERED_RAW {
            return Ok(Self::Unanswered);
        }
        usize::try_from(raw)
            .map_err(|_| QuizError::InvalidOption { index: raw })
            .and_then(OptionIndex::new)
            .map(Self::Chosen)
    }

    /// Numeric form of the slot, `-1` when unanswered.
    #[must_use]
    pub fn raw(self) -> i64 {
        match self {
            Self::Unanswered => Self::UNANSWERED_RAW,
            Self::Chosen(index) => i64::from(index.value()),
        }
    }

    #[must_use]
    pub fn chosen(self) -> Option<OptionIndex> {
        match self {
            Self::Unanswered => None,
            Self::Chosen(index) => Some(index),
        }
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, Self::Chosen(_))
    }
}

impl From<OptionIndex> for AnswerSlot {
    fn from(index: OptionIndex) -> Self {
        Self::Chosen(index)
    }
}

//
// ─── ANSWER SLOTS ─────────────────────────────────────────────────────────────
//

/// Per-question answer storage, parallel to the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSlots([AnswerSlot; QUESTION_COUNT]);

impl AnswerSlots {
    /// All slots start unanswered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.0 = [AnswerSlot::Unanswered; QUESTION_COUNT];
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<AnswerSlot> {
        self.0.get(index).copied()
    }

    /// Overwrites one slot. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, slot: AnswerSlot) {
        if let Some(entry) = self.0.get_mut(index) {
            *entry = slot;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerSlot> {
        self.0.iter()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_answered()).count()
    }
}
