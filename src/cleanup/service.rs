use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::operation::CleanupOperation;
use super::orchestrator::CleanupOrchestrator;
use super::progress::{CleanupProgress, NoProgress};
use super::result::CleanupSessionResult;
use crate::history::{HistoryError, HistoryRecord, HistoryStore};

/// What happened to the history row for a session.
#[derive(Debug)]
pub enum HistoryOutcome {
    Saved(HistoryRecord),
    /// Nothing was recorded, with the reason.
    Skipped(String),
    /// The cleanup itself is still valid; only saving failed.
    Failed(HistoryError),
}

/// How much a successful session freed, for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreedSummary {
    /// More than half a gigabyte.
    Substantial,
    Some,
    /// Nothing freed, or free memory went down.
    Nothing,
}

impl FreedSummary {
    pub fn classify(freed_gb: f64) -> Self {
        if freed_gb > 0.5 {
            Self::Substantial
        } else if freed_gb > 0.0 {
            Self::Some
        } else {
            Self::Nothing
        }
    }
}

#[derive(Debug)]
pub struct CleanupReport {
    pub session: CleanupSessionResult,
    pub history: HistoryOutcome,
}

impl CleanupReport {
    pub fn freed_summary(&self) -> Option<FreedSummary> {
        self.session.freed_gb().map(FreedSummary::classify)
    }
}

/// Runs cleanup sessions against one tool and records them in one store.
pub struct CleanupService {
    orchestrator: Arc<CleanupOrchestrator>,
    history: Arc<HistoryStore>,
    tool_path: PathBuf,
}

impl CleanupService {
    pub fn new(
        orchestrator: Arc<CleanupOrchestrator>,
        history: Arc<HistoryStore>,
        tool_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            orchestrator,
            history,
            tool_path: tool_path.into(),
        }
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub async fn run(&self, selected: &[CleanupOperation]) -> CleanupReport {
        self.run_with_progress(selected, &NoProgress).await
    }

    pub async fn run_with_progress(
        &self,
        selected: &[CleanupOperation],
        progress: &dyn CleanupProgress,
    ) -> CleanupReport {
        if CleanupOperation::is_full_set(selected) {
            warn!("All cleanup operations selected; the system may become briefly unresponsive");
        }

        let session = self
            .orchestrator
            .execute_with_progress(selected, &self.tool_path, progress)
            .await;
        let history = self.record(&session).await;

        CleanupReport { session, history }
    }

    /// Persist on the blocking pool; appends do synchronous file I/O.
    async fn record(&self, session: &CleanupSessionResult) -> HistoryOutcome {
        if !session.success() {
            return HistoryOutcome::Skipped("cleanup did not complete".to_string());
        }
        if session.sampling_degraded() {
            warn!(
                "Not recording session {}: memory sampling failed ({})",
                session.session_id(),
                session.sampling_errors().join("; ")
            );
            return HistoryOutcome::Skipped("memory statistics were unavailable".to_string());
        }
        let Some(record) = HistoryRecord::from_session(session) else {
            return HistoryOutcome::Skipped("session has no memory delta".to_string());
        };

        let store = Arc::clone(&self.history);
        let row = record.clone();
        let appended = tokio::task::spawn_blocking(move || store.append(row))
            .await
            .unwrap_or_else(|e| Err(HistoryError::Io(std::io::Error::other(e))));

        match appended {
            Ok(count) => {
                info!("History now holds {} records", count);
                HistoryOutcome::Saved(record)
            }
            Err(e) => {
                error!("Error saving memory usage history: {}", e);
                HistoryOutcome::Failed(e)
            }
        }
    }
}
