#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::FileResultLog;
pub use repository::{InMemoryResultLog, ResultLog, StorageError, log_line};
