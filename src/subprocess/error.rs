use thiserror::Error;

/// Failure to launch a process at all.
///
/// A process that starts and exits non-zero is not an error at this layer;
/// it comes back as a normal [`ProcessOutput`](super::ProcessOutput).
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Permission denied launching {0}")]
    PermissionDenied(String),

    #[error("Failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Mock expectation not met: {0}")]
    MockExpectationNotMet(String),
}

impl ProcessError {
    /// Classify an I/O error raised while spawning `command`.
    pub fn from_spawn(command: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::CommandNotFound(command.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(command.to_string()),
            _ => Self::Spawn {
                command: command.to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_spawn_error_classification() {
        let not_found = ProcessError::from_spawn("tool", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(not_found, ProcessError::CommandNotFound(ref c) if c == "tool"));

        let denied =
            ProcessError::from_spawn("tool", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, ProcessError::PermissionDenied(_)));

        let other = ProcessError::from_spawn("tool", io::Error::other("fork failed"));
        assert!(matches!(other, ProcessError::Spawn { .. }));
        assert!(other.to_string().contains("fork failed"));
    }
}
