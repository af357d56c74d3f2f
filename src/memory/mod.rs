//! System memory statistics.
//!
//! Snapshots are taken through the [`MemorySampler`] trait so the cleanup
//! orchestrator can be driven by scripted values in tests. "Free" memory is
//! the memory the OS reports as available for new allocations.

pub mod sampler;

pub use sampler::{MemorySampler, SamplingError, ScriptedSampler, SysinfoSampler};

use serde::{Deserialize, Serialize};

pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Point-in-time memory statistics, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
}

impl MemorySnapshot {
    pub fn new(total_bytes: u64, free_bytes: u64, used_bytes: u64) -> Self {
        Self {
            total_bytes,
            free_bytes,
            used_bytes,
        }
    }

    /// The snapshot handed out when the OS query fails.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn is_zeroed(&self) -> bool {
        *self == Self::zeroed()
    }

    pub fn percent_used(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.total_bytes as f64 * 100.0
    }

    pub fn total_gb(&self) -> f64 {
        bytes_to_gb(self.total_bytes)
    }

    pub fn free_gb(&self) -> f64 {
        bytes_to_gb(self.free_bytes)
    }

    pub fn used_gb(&self) -> f64 {
        bytes_to_gb(self.used_bytes)
    }

    /// Signed change in free memory from `self` to `after`.
    pub fn free_delta(&self, after: &MemorySnapshot) -> i64 {
        after.free_bytes as i64 - self.free_bytes as i64
    }
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB as f64
}

pub fn signed_bytes_to_gb(bytes: i64) -> f64 {
    bytes as f64 / BYTES_PER_GB as f64
}

/// Human-readable size: megabytes below 1 GB, gigabytes otherwise.
pub fn format_memory(bytes: u64) -> String {
    if bytes < BYTES_PER_GB {
        format!("{:.2} MB", bytes as f64 / BYTES_PER_MB as f64)
    } else {
        format!("{:.2} GB", bytes_to_gb(bytes))
    }
}
