use quiz_core::model::ResultRecord;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by result log adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("cannot write result log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result log lock poisoned: {0}")]
    Poisoned(String),

    #[error("result record for {id:?} contains a line break")]
    MultiLineRecord { id: String },
}

/// Serialize a record, refusing anything that would span more than one line.
///
/// # Errors
///
/// Returns `StorageError::MultiLineRecord` if the id or name holds `\n` or `\r`.
pub fn log_line(record: &ResultRecord) -> Result<String, StorageError> {
    let respondent = record.respondent();
    let breaks = |text: &str| text.contains(|c: char| matches!(c, '\n' | '\r'));
    if breaks(respondent.id()) || breaks(respondent.name()) {
        return Err(StorageError::MultiLineRecord {
            id: respondent.id().to_string(),
        });
    }
    Ok(record.to_log_line())
}

/// Append-only sink for completed quiz results.
///
/// Implementations must never drop or rewrite content that is already there.
pub trait ResultLog: Send + Sync {
    /// Append one record as a single line.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sink cannot be opened or written.
    fn append(&self, record: &ResultRecord) -> Result<(), StorageError>;
}

/// In-memory log for tests and dry runs.
#[derive(Clone, Default)]
pub struct InMemoryResultLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl InMemoryResultLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line appended so far, newlines included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a writer panicked mid-append.
    pub fn lines(&self) -> Result<Vec<String>, StorageError> {
        let guard = self
            .lines
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl ResultLog for InMemoryResultLog {
    fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let line = log_line(record)?;
        let mut guard = self
            .lines
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.push(line);
        Ok(())
    }
}
