//! Wiring of long-lived services from configuration.

use std::sync::Arc;
use tracing::debug;

use crate::cleanup::{CleanupOrchestrator, CleanupService};
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::memory::{MemorySampler, SysinfoSampler};
use crate::version::{GithubReleaseProvider, UpdateChecker};

/// The services one process needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub sampler: Arc<dyn MemorySampler>,
    pub history: Arc<HistoryStore>,
    pub cleanup: CleanupService,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let sampler: Arc<dyn MemorySampler> = Arc::new(SysinfoSampler::new());
        let history = Arc::new(HistoryStore::new(config.history_path()));
        let orchestrator = Arc::new(CleanupOrchestrator::production(Arc::clone(&sampler)));
        let cleanup = CleanupService::new(
            orchestrator,
            Arc::clone(&history),
            config.resolved_tool_path(),
        );

        debug!(
            "Using tool {} and history {}",
            cleanup.tool_path().display(),
            history.path().display()
        );

        Self {
            config,
            sampler,
            history,
            cleanup,
        }
    }

    /// Update checker against the configured release endpoint.
    pub fn update_checker(&self) -> Result<UpdateChecker> {
        let provider = GithubReleaseProvider::new(
            self.config.release_api_url.clone(),
            self.config.user_agent.clone(),
            self.config.metadata_timeout,
        )?;
        Ok(UpdateChecker::new(
            self.config.version_path(),
            Arc::new(provider),
        ))
    }
}
