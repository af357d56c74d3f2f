use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use sysinfo::System;
use thiserror::Error;

use super::MemorySnapshot;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Memory statistics are not supported on this platform")]
    Unsupported,

    #[error("Memory query returned no data: {0}")]
    Unavailable(String),
}

/// Reads current system memory statistics.
pub trait MemorySampler: Send + Sync {
    fn sample(&self) -> Result<MemorySnapshot, SamplingError>;

    /// Sample, degrading to a zeroed snapshot on failure.
    ///
    /// The error is returned alongside so the caller can report it.
    fn sample_or_zeroed(&self) -> (MemorySnapshot, Option<SamplingError>) {
        match self.sample() {
            Ok(snapshot) => (snapshot, None),
            Err(e) => {
                tracing::error!("Error fetching memory info: {}", e);
                (MemorySnapshot::zeroed(), Some(e))
            }
        }
    }
}

/// Samples memory through `sysinfo`.
pub struct SysinfoSampler {
    system: Mutex<System>,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySampler for SysinfoSampler {
    fn sample(&self) -> Result<MemorySnapshot, SamplingError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SamplingError::Unsupported);
        }

        let mut system = self
            .system
            .lock()
            .map_err(|_| SamplingError::Unavailable("sampler state poisoned".to_string()))?;
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return Err(SamplingError::Unavailable(
                "total memory reported as zero".to_string(),
            ));
        }

        let snapshot = MemorySnapshot::new(total, system.available_memory(), system.used_memory());
        tracing::debug!(
            "Sampled memory: total={} free={} used={} ({:.1}%)",
            snapshot.total_bytes,
            snapshot.free_bytes,
            snapshot.used_bytes,
            snapshot.percent_used()
        );
        Ok(snapshot)
    }
}

/// Hands out a fixed sequence of samples, for tests and dry runs.
///
/// Once the script is exhausted every further call fails with
/// [`SamplingError::Unavailable`].
#[derive(Clone, Default)]
pub struct ScriptedSampler {
    samples: Arc<Mutex<VecDeque<Result<MemorySnapshot, SamplingError>>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedSampler {
    pub fn new<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Result<MemorySnapshot, SamplingError>>,
    {
        Self {
            samples: Arc::new(Mutex::new(samples.into_iter().collect())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Script of successful samples with the given free-memory values.
    pub fn with_free_bytes(total: u64, free: &[u64]) -> Self {
        Self::new(
            free.iter()
                .map(|&f| Ok(MemorySnapshot::new(total, f, total.saturating_sub(f)))),
        )
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl MemorySampler for ScriptedSampler {
    fn sample(&self) -> Result<MemorySnapshot, SamplingError> {
        *self.calls.lock().unwrap() += 1;
        self.samples
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SamplingError::Unavailable("script exhausted".to_string())))
    }
}
