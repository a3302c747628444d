use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use quiz_core::model::ResultRecord;

use crate::repository::{ResultLog, StorageError, log_line};

/// Default file name used when no path is configured.
pub const DEFAULT_RESULTS_FILE: &str = "quiz_results.txt";

/// Plain-text result log, one record per line.
///
/// The file is opened in append mode for every write and closed afterwards,
/// so existing content is always preserved.
#[derive(Debug, Clone)]
pub struct FileResultLog {
    path: PathBuf,
}

impl FileResultLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                debug!("creating result log directory {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))
            }
            _ => Ok(()),
        }
    }
}

impl Default for FileResultLog {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_FILE)
    }
}

impl ResultLog for FileResultLog {
    fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let line = log_line(record)?;
        self.ensure_parent()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        // Single write so a line is never split across appends.
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        info!(
            "appended result for {} to {}",
            record.respondent().id(),
            self.path.display()
        );
        Ok(())
    }
}
