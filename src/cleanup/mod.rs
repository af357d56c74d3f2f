//! Cleanup orchestration.
//!
//! A session samples free memory, runs the selected operations through the
//! external tool strictly in order, stops at the first failure and samples
//! again only when every step succeeded. [`CleanupService`] adds persistence
//! of successful sessions to the history store.

pub mod operation;
pub mod orchestrator;
pub mod progress;
pub mod result;
pub mod service;
pub mod tool;


pub use operation::{CleanupOperation, ParseOperationError};
pub use orchestrator::CleanupOrchestrator;
pub use progress::{CleanupProgress, NoProgress};
pub use result::{CleanupError, CleanupSessionResult, CleanupStepResult};
pub use service::{CleanupReport, CleanupService, FreedSummary, HistoryOutcome};
pub use tool::is_executable;
