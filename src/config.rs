use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application configuration. Every field has a default so a partial (or
/// missing) config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session_file: PathBuf,
    pub points_db: PathBuf,
    pub log_dir: PathBuf,
    pub institution: String,
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(&data_dir)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "profile-tui", "profile-tui")
}

impl AppConfig {
    /// Defaults rooted at `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            session_file: data_dir.join("session.json"),
            points_db: data_dir.join("points.db"),
            log_dir: data_dir.join("logs"),
            institution: "Illinois Institute of Technology".to_string(),
            tick_rate_ms: 100,
        }
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = project_dirs().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line path overrides.
    pub fn with_overrides(mut self, session: Option<PathBuf>, points_db: Option<PathBuf>) -> Self {
        if let Some(session) = session {
            self.session_file = session;
        }
        if let Some(points_db) = points_db {
            self.points_db = points_db;
        }
        self
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms.max(10))
    }
}
