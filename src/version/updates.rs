use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use super::checker::{check, VersionStatus};
use super::local::read_local_version;
use super::release::ReleaseProvider;

/// Result of one update check. Recomputed on every check, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub local: Option<String>,
    pub remote: Option<String>,
    pub release_url: Option<String>,
    pub notes: Option<String>,
    pub status: VersionStatus,
    /// Why the remote version is missing, when it is.
    pub error: Option<String>,
}

/// Compares the installed version marker against the latest release.
pub struct UpdateChecker {
    version_file: PathBuf,
    provider: Arc<dyn ReleaseProvider>,
}

impl UpdateChecker {
    pub fn new(version_file: impl Into<PathBuf>, provider: Arc<dyn ReleaseProvider>) -> Self {
        Self {
            version_file: version_file.into(),
            provider,
        }
    }

    /// Installed version, or `None` when the marker is absent or unreadable.
    pub fn local_version(&self) -> Option<String> {
        read_local_version(&self.version_file).unwrap_or_else(|e| {
            warn!("Error reading version file {}: {}", self.version_file.display(), e);
            None
        })
    }

    pub async fn check(&self) -> VersionInfo {
        let local = self.local_version();

        let (remote, release_url, notes, error) = match self.provider.latest_release().await {
            Ok(release) => (
                Some(release.tag_name),
                release.html_url,
                Some(release.body),
                None,
            ),
            Err(e) => (None, None, None, Some(e.to_string())),
        };

        let status = check(local.as_deref(), remote.as_deref());
        VersionInfo {
            local,
            remote,
            release_url,
            notes,
            status,
            error,
        }
    }
}
