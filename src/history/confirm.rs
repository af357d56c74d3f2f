use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Proof that deletion of a history store was requested.
///
/// Only [`HistoryStore::request_clear`](super::HistoryStore::request_clear)
/// can create one, and [`HistoryStore::confirm_clear`](super::HistoryStore::confirm_clear)
/// consumes it, so each request confirms at most one deletion.
#[derive(Debug)]
#[must_use = "a clear request does nothing until it is confirmed"]
pub struct ClearToken {
    store_path: PathBuf,
    record_count: Option<usize>,
    issued_at: DateTime<Local>,
}

impl ClearToken {
    pub(crate) fn issue(store_path: &Path, record_count: Option<usize>) -> Self {
        Self {
            store_path: store_path.to_path_buf(),
            record_count,
            issued_at: Local::now(),
        }
    }

    pub(crate) fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Records present when the request was made; `None` if the store
    /// could not be read.
    pub fn record_count(&self) -> Option<usize> {
        self.record_count
    }

    pub fn issued_at(&self) -> DateTime<Local> {
        self.issued_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    NothingToClear,
}
