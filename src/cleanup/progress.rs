use super::operation::CleanupOperation;

/// Observer for a running cleanup session.
///
/// Every method has a no-op default. `should_continue` is consulted before
/// each step after the first; a step already launched always runs to
/// completion.
pub trait CleanupProgress: Send + Sync {
    fn step_started(&self, _operation: CleanupOperation, _index: usize, _total: usize) {}

    /// `fraction` is steps completed over total steps.
    fn step_finished(&self, _operation: CleanupOperation, _fraction: f64) {}

    fn should_continue(&self) -> bool {
        true
    }
}

/// Progress observer that ignores everything.
pub struct NoProgress;

impl CleanupProgress for NoProgress {}
