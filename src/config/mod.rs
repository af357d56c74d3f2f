//! Configuration: where the tool, history and version marker live, and how
//! update checks reach the network.
//!
//! Values come from defaults, then an optional TOML file, then `MEMCLEAN_*`
//! environment variables. Command-line overrides are applied by the caller.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "memclean.toml";
pub const DEFAULT_TOOL: &str = "EmptyStandbyList.exe";
pub const DEFAULT_HISTORY_FILE: &str = "memory_usage.csv";
pub const DEFAULT_VERSION_FILE: &str = "version.txt";
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/PatrickJnr/StreamLitMemCleaner/releases/latest";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "memclean", "memclean")
}

/// Get the global directory for storing history and the version marker
pub fn get_global_data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
}

/// Default location of the config file, if a home directory exists.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Relative paths resolve against the working directory.
    pub tool_path: PathBuf,
    /// Relative paths resolve against `data_dir`.
    pub history_file: PathBuf,
    /// Relative paths resolve against `data_dir`.
    pub version_file: PathBuf,
    pub release_api_url: String,
    pub user_agent: String,
    #[serde(with = "humantime_serde")]
    pub metadata_timeout: Duration,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: get_global_data_dir().unwrap_or_else(|_| PathBuf::from("data")),
            tool_path: PathBuf::from(DEFAULT_TOOL),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
            release_api_url: DEFAULT_RELEASE_URL.to_string(),
            user_agent: format!("memclean/{}", env!("CARGO_PKG_VERSION")),
            metadata_timeout: Duration::from_secs(10),
            log_level: None,
        }
    }
}

impl Config {
    /// Load from `explicit` (which must exist) or the default config file
    /// (used only if present), then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_file() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.merge_env_vars();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply `MEMCLEAN_*` overrides from `lookup`.
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MEMCLEAN_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(tool) = lookup("MEMCLEAN_TOOL_PATH") {
            self.tool_path = PathBuf::from(tool);
        }
        if let Some(url) = lookup("MEMCLEAN_RELEASE_URL") {
            self.release_api_url = url;
        }
        if let Some(level) = lookup("MEMCLEAN_LOG_LEVEL") {
            self.log_level = Some(level);
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn version_path(&self) -> PathBuf {
        self.data_dir.join(&self.version_file)
    }

    /// Tool path made absolute against the current directory.
    pub fn resolved_tool_path(&self) -> PathBuf {
        if self.tool_path.is_absolute() {
            return self.tool_path.clone();
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.tool_path))
            .unwrap_or_else(|_| self.tool_path.clone())
    }
}
