use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use super::operation::CleanupOperation;
use crate::memory::{signed_bytes_to_gb, MemorySnapshot};
use crate::subprocess::ExitStatus;

/// Outcome of one attempt to run one operation through the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupStepResult {
    pub operation: CleanupOperation,
    /// `None` when the tool could not be launched.
    pub exit_status: Option<ExitStatus>,
    pub output: String,
}

impl CleanupStepResult {
    pub fn succeeded(&self) -> bool {
        self.exit_status.is_some_and(|s| s.success())
    }
}

/// Why a cleanup session did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleanupError {
    #[error("No cleanup operations selected")]
    EmptySelection,

    #[error("Cleanup tool not found or not executable at {}", path.display())]
    ToolMissing { path: PathBuf },

    #[error("Another cleanup is already running")]
    Busy,

    #[error("Could not launch the cleanup tool for {operation}: {message}")]
    Launch {
        operation: CleanupOperation,
        message: String,
    },

    #[error("Error in {operation} ({status}): {output}")]
    StepFailed {
        operation: CleanupOperation,
        status: ExitStatus,
        output: String,
    },

    #[error("Cleanup stopped after {completed} of {total} operations")]
    Cancelled { completed: usize, total: usize },
}

impl CleanupError {
    /// The operation that failed, when the failure belongs to one step.
    pub fn operation(&self) -> Option<CleanupOperation> {
        match self {
            Self::Launch { operation, .. } | Self::StepFailed { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Everything observed during one orchestration run.
///
/// Built only by the orchestrator. A failed session never carries an
/// after-snapshot or a freed amount.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupSessionResult {
    session_id: Uuid,
    success: bool,
    started_at: DateTime<Local>,
    finished_at: DateTime<Local>,
    operations: Vec<CleanupOperation>,
    steps: Vec<CleanupStepResult>,
    memory_before: Option<MemorySnapshot>,
    memory_after: Option<MemorySnapshot>,
    freed_bytes: Option<i64>,
    error: Option<CleanupError>,
    sampling_errors: Vec<String>,
}

/// Fields shared by every session outcome.
#[derive(Debug, Clone)]
pub(crate) struct SessionContext {
    pub session_id: Uuid,
    pub started_at: DateTime<Local>,
    pub operations: Vec<CleanupOperation>,
}

impl SessionContext {
    pub fn start(operations: &[CleanupOperation]) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Local::now(),
            operations: operations.to_vec(),
        }
    }
}

impl CleanupSessionResult {
    /// A session refused before any sample was taken or step was run.
    pub(crate) fn rejected(ctx: SessionContext, error: CleanupError) -> Self {
        Self {
            session_id: ctx.session_id,
            success: false,
            started_at: ctx.started_at,
            finished_at: Local::now(),
            operations: ctx.operations,
            steps: Vec::new(),
            memory_before: None,
            memory_after: None,
            freed_bytes: None,
            error: Some(error),
            sampling_errors: Vec::new(),
        }
    }

    /// A session that started but stopped before every step succeeded.
    pub(crate) fn aborted(
        ctx: SessionContext,
        memory_before: MemorySnapshot,
        steps: Vec<CleanupStepResult>,
        error: CleanupError,
        sampling_errors: Vec<String>,
    ) -> Self {
        Self {
            session_id: ctx.session_id,
            success: false,
            started_at: ctx.started_at,
            finished_at: Local::now(),
            operations: ctx.operations,
            steps,
            memory_before: Some(memory_before),
            memory_after: None,
            freed_bytes: None,
            error: Some(error),
            sampling_errors,
        }
    }

    pub(crate) fn completed(
        ctx: SessionContext,
        memory_before: MemorySnapshot,
        memory_after: MemorySnapshot,
        steps: Vec<CleanupStepResult>,
        sampling_errors: Vec<String>,
    ) -> Self {
        Self {
            session_id: ctx.session_id,
            success: true,
            started_at: ctx.started_at,
            finished_at: Local::now(),
            operations: ctx.operations,
            steps,
            memory_before: Some(memory_before),
            memory_after: Some(memory_after),
            freed_bytes: Some(memory_before.free_delta(&memory_after)),
            error: None,
            sampling_errors,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Local> {
        self.finished_at
    }

    pub fn operations(&self) -> &[CleanupOperation] {
        &self.operations
    }

    pub fn steps(&self) -> &[CleanupStepResult] {
        &self.steps
    }

    pub fn memory_before(&self) -> Option<&MemorySnapshot> {
        self.memory_before.as_ref()
    }

    pub fn memory_after(&self) -> Option<&MemorySnapshot> {
        self.memory_after.as_ref()
    }

    /// `after.free - before.free`; negative when memory pressure grew.
    pub fn freed_bytes(&self) -> Option<i64> {
        self.freed_bytes
    }

    pub fn freed_gb(&self) -> Option<f64> {
        self.freed_bytes.map(signed_bytes_to_gb)
    }

    pub fn failed_step(&self) -> Option<&CleanupStepResult> {
        if self.success {
            return None;
        }
        self.steps.last().filter(|step| !step.succeeded())
    }

    pub fn error(&self) -> Option<&CleanupError> {
        self.error.as_ref()
    }

    pub fn sampling_errors(&self) -> &[String] {
        &self.sampling_errors
    }

    /// True when a memory sample fell back to zeroes, making the delta
    /// meaningless.
    pub fn sampling_degraded(&self) -> bool {
        !self.sampling_errors.is_empty()
    }
}
