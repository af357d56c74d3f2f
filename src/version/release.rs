//! Latest-release metadata from a remote provider.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_RELEASE_NOTES: &str = "No changelog available.";

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Failed to fetch the latest release: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Latest release has no tag name")]
    MissingTag,
}

/// The parts of a release this crate consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub html_url: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    async fn latest_release(&self) -> Result<ReleaseInfo, ReleaseError>;
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: Option<String>,
    html_url: Option<String>,
    body: Option<String>,
}

/// Reads `releases/latest` from the GitHub REST API.
///
/// One request per call, bounded by the configured timeout and never
/// retried.
pub struct GithubReleaseProvider {
    client: Client,
    url: String,
    user_agent: String,
}

impl GithubReleaseProvider {
    pub fn new(
        url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReleaseError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
        })
    }

    async fn fetch(&self) -> Result<ReleaseInfo, ReleaseError> {
        let release: GithubRelease = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(tag_name) = release.tag_name.filter(|t| !t.trim().is_empty()) else {
            warn!("No tag name found in release data");
            return Err(ReleaseError::MissingTag);
        };

        Ok(ReleaseInfo {
            tag_name,
            html_url: release.html_url,
            body: release
                .body
                .unwrap_or_else(|| DEFAULT_RELEASE_NOTES.to_string()),
        })
    }
}

#[async_trait]
impl ReleaseProvider for GithubReleaseProvider {
    async fn latest_release(&self) -> Result<ReleaseInfo, ReleaseError> {
        info!("Fetching latest release from {}", self.url);
        match self.fetch().await {
            Ok(release) => {
                info!("Latest version: {}", release.tag_name);
                Ok(release)
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }
}
