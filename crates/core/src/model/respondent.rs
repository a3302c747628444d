use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RespondentError {
    #[error("respondent id cannot be empty")]
    EmptyId,

    #[error("respondent name cannot be empty")]
    EmptyName,
}

/// Returns true when both fields are non-empty after trimming whitespace.
#[must_use]
pub fn validate_respondent(id: &str, name: &str) -> bool {
    Respondent::check(id, name).is_ok()
}

/// The person taking the quiz.
///
/// Both fields are kept exactly as entered; validation only looks at the
/// trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRespondent")]
pub struct Respondent {
    id: String,
    name: String,
}

/// Unvalidated wire shape; only converted through `Respondent::new`.
#[derive(Deserialize)]
struct RawRespondent {
    id: String,
    name: String,
}

impl TryFrom<RawRespondent> for Respondent {
    type Error = RespondentError;

    fn try_from(raw: RawRespondent) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.name)
    }
}

impl Respondent {
    /// # Errors
    ///
    /// Returns `RespondentError::EmptyId` or `RespondentError::EmptyName` when
    /// the corresponding field is blank.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, RespondentError> {
        let id = id.into();
        let name = name.into();
        Self::check(&id, &name)?;
        Ok(Self { id, name })
    }

    fn check(id: &str, name: &str) -> Result<(), RespondentError> {
        if id.trim().is_empty() {
            return Err(RespondentError::EmptyId);
        }
        if name.trim().is_empty() {
            return Err(RespondentError::EmptyName);
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
