use serde::Serialize;

/// Classification of the installed version against the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    UpToDate,
    NotInstalled,
    Outdated,
    /// No remote version was available to compare against.
    CheckFailed,
}

impl VersionStatus {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Self::UpToDate)
    }

    pub fn is_missing_local(&self) -> bool {
        matches!(self, Self::NotInstalled)
    }

    pub fn is_outdated(&self) -> bool {
        matches!(self, Self::Outdated)
    }
}

/// Compare version strings. Surrounding whitespace is ignored and a blank
/// string counts as absent; otherwise the comparison is exact.
pub fn check(local: Option<&str>, remote: Option<&str>) -> VersionStatus {
    match (present(local), present(remote)) {
        (_, None) => VersionStatus::CheckFailed,
        (None, Some(_)) => VersionStatus::NotInstalled,
        (Some(local), Some(remote)) if local == remote => VersionStatus::UpToDate,
        (Some(_), Some(_)) => VersionStatus::Outdated,
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
