//! Error types for history persistence

use std::path::PathBuf;
use thiserror::Error;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing CSV rows failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Stored history could not be parsed
    #[error("History file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// A clear token issued for a different store was presented
    #[error("Clear token was issued for {}, not {}", issued_for.display(), store.display())]
    TokenMismatch { issued_for: PathBuf, store: PathBuf },

    /// The store gained or lost records after deletion was requested
    #[error("History changed since deletion was requested ({} records then, {} now)", count_text(.requested), count_text(.current))]
    StaleToken {
        requested: Option<usize>,
        current: Option<usize>,
    },

    /// The writer lock was poisoned by a panicking writer
    #[error("History lock error: {0}")]
    Lock(String),
}

fn count_text(count: &Option<usize>) -> String {
    count.map_or_else(|| "unreadable".to_string(), |n| n.to_string())
}

impl HistoryError {
    pub fn corrupt<E: std::fmt::Display>(path: &std::path::Path, err: E) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
