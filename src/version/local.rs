use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Read the installed version from its marker file.
///
/// Returns `Ok(None)` when the file is missing or blank.
pub fn read_local_version(path: &Path) -> std::io::Result<Option<String>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No local version file found at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let version = contents
        .lines()
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    if let Some(ref v) = version {
        info!("Local version: {}", v);
    }
    Ok(version)
}
