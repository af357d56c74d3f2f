use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::operation::CleanupOperation;
use super::progress::{CleanupProgress, NoProgress};
use super::result::{CleanupError, CleanupSessionResult, CleanupStepResult, SessionContext};
use super::tool;
use crate::memory::MemorySampler;
use crate::subprocess::{ProcessCommandBuilder, ProcessRunner, SubprocessManager};

/// Runs cleanup operations through the external tool, one at a time.
///
/// At most one session runs per orchestrator; a request that arrives while
/// another is in flight is refused with [`CleanupError::Busy`].
pub struct CleanupOrchestrator {
    runner: Arc<dyn ProcessRunner>,
    sampler: Arc<dyn MemorySampler>,
    lock: Mutex<()>,
}

impl CleanupOrchestrator {
    pub fn new(runner: Arc<dyn ProcessRunner>, sampler: Arc<dyn MemorySampler>) -> Self {
        Self {
            runner,
            sampler,
            lock: Mutex::new(()),
        }
    }

    /// Real process runner with the given sampler.
    pub fn production(sampler: Arc<dyn MemorySampler>) -> Self {
        Self::new(SubprocessManager::production().runner(), sampler)
    }

    pub async fn execute(
        &self,
        selected: &[CleanupOperation],
        tool_path: &Path,
    ) -> CleanupSessionResult {
        self.execute_with_progress(selected, tool_path, &NoProgress)
            .await
    }

    /// Run `selected` in order, stopping at the first failure.
    ///
    /// Always returns a well-formed session; failures are carried in
    /// [`CleanupSessionResult::error`].
    pub async fn execute_with_progress(
        &self,
        selected: &[CleanupOperation],
        tool_path: &Path,
        progress: &dyn CleanupProgress,
    ) -> CleanupSessionResult {
        let ctx = SessionContext::start(selected);

        if selected.is_empty() {
            warn!("Cleanup requested with no operations selected");
            return CleanupSessionResult::rejected(ctx, CleanupError::EmptySelection);
        }

        let Ok(_guard) = self.lock.try_lock() else {
            warn!("Cleanup requested while another session is running");
            return CleanupSessionResult::rejected(ctx, CleanupError::Busy);
        };

        if !tool::is_executable(tool_path) {
            error!("Executable not found at {}", tool_path.display());
            return CleanupSessionResult::rejected(
                ctx,
                CleanupError::ToolMissing {
                    path: tool_path.to_path_buf(),
                },
            );
        }

        let mut sampling_errors = Vec::new();
        let (memory_before, err) = self.sampler.sample_or_zeroed();
        if let Some(e) = err {
            sampling_errors.push(format!("before cleanup: {e}"));
        }
        info!(
            session = %ctx.session_id,
            "Starting cleanup with free memory: {:.2} GB",
            memory_before.free_gb()
        );

        let total = selected.len();
        let mut steps = Vec::with_capacity(total);

        for (index, &operation) in selected.iter().enumerate() {
            if index > 0 && !progress.should_continue() {
                info!("Cleanup stopped by caller after {} of {} operations", index, total);
                return CleanupSessionResult::aborted(
                    ctx,
                    memory_before,
                    steps,
                    CleanupError::Cancelled {
                        completed: index,
                        total,
                    },
                    sampling_errors,
                );
            }

            progress.step_started(operation, index, total);
            info!("Executing cleanup tool for {}", operation.description());

            let command = ProcessCommandBuilder::for_path(tool_path)
                .arg(operation.token())
                .build();

            match self.runner.run(command).await {
                Ok(output) if output.status.success() => {
                    info!("Successfully executed {}", operation);
                    steps.push(CleanupStepResult {
                        operation,
                        exit_status: Some(output.status),
                        output: output.combined_output(),
                    });
                    progress.step_finished(operation, (index + 1) as f64 / total as f64);
                }
                Ok(output) => {
                    let text = output.combined_output();
                    error!("Error in {}: {} ({})", operation, text, output.status);
                    steps.push(CleanupStepResult {
                        operation,
                        exit_status: Some(output.status),
                        output: text.clone(),
                    });
                    return CleanupSessionResult::aborted(
                        ctx,
                        memory_before,
                        steps,
                        CleanupError::StepFailed {
                            operation,
                            status: output.status,
                            output: text,
                        },
                        sampling_errors,
                    );
                }
                Err(e) => {
                    let message = e.to_string();
                    error!("Command execution error for {}: {}", operation, message);
                    steps.push(CleanupStepResult {
                        operation,
                        exit_status: None,
                        output: message.clone(),
                    });
                    return CleanupSessionResult::aborted(
                        ctx,
                        memory_before,
                        steps,
                        CleanupError::Launch { operation, message },
                        sampling_errors,
                    );
                }
            }
        }

        let (memory_after, err) = self.sampler.sample_or_zeroed();
        if let Some(e) = err {
            sampling_errors.push(format!("after cleanup: {e}"));
        }

        let result =
            CleanupSessionResult::completed(ctx, memory_before, memory_after, steps, sampling_errors);
        info!(
            "Cleanup complete. Memory before: {:.2} GB, after: {:.2} GB, freed: {:.2} GB",
            memory_before.free_gb(),
            memory_after.free_gb(),
            result.freed_gb().unwrap_or_default()
        );
        debug!(session = %result.session_id(), "Cleanup steps: {}", result.steps().len());
        result
    }
}
