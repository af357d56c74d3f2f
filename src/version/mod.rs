//! Installed-version and update information.
//!
//! [`check`] is a pure comparison; fetching the latest release belongs to a
//! [`ReleaseProvider`].

pub mod checker;
pub mod local;
pub mod release;
pub mod updates;

pub use checker::{check, VersionStatus};
pub use local::read_local_version;
pub use release::{GithubReleaseProvider, ReleaseError, ReleaseInfo, ReleaseProvider};
pub use updates::{UpdateChecker, VersionInfo};
