// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3456;
/// Size of the log tail window returned by `/api/status`
pub const DEFAULT_RECENT_LOGS: usize = 20;

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Upper bound in seconds for a single HTTP connection (0 disables)
    pub connection_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            connection_timeout: 30,
        }
    }
}

/// Locations of the artifacts written by the iteration loop and of the
/// front-end bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    pub status_file: PathBuf,
    pub metrics_file: PathBuf,
    pub log_file: PathBuf,
    pub public_dir: PathBuf,
    pub recent_logs: usize,
}

impl PathsConfig {
    /// Default layout relative to a project root
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            status_file: root.join("status.json"),
            metrics_file: root.join("logs").join("metrics.json"),
            log_file: root.join("logs").join("iteration.log"),
            public_dir: root.join("dashboard").join("public"),
            recent_logs: DEFAULT_RECENT_LOGS,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<PathBuf>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<PathBuf>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Log verbosity, ordered from least to most verbose
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

// ============================================
// Raw (as-loaded) shapes
// ============================================

/// Configuration exactly as deserialized from the layered sources.
/// Path defaults depend on `paths.root`, so they are filled in afterwards.
#[derive(Debug, Deserialize)]
pub(super) struct RawConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub paths: RawPathsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawPathsConfig {
    pub root: Option<PathBuf>,
    pub status_file: Option<PathBuf>,
    pub metrics_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
    pub recent_logs: Option<usize>,
}

impl RawPathsConfig {
    pub fn resolve(self) -> PathsConfig {
        let defaults = PathsConfig::rooted_at(self.root.unwrap_or_else(|| PathBuf::from(".")));
        PathsConfig {
            status_file: self.status_file.unwrap_or(defaults.status_file),
            metrics_file: self.metrics_file.unwrap_or(defaults.metrics_file),
            log_file: self.log_file.unwrap_or(defaults.log_file),
            public_dir: self.public_dir.unwrap_or(defaults.public_dir),
            recent_logs: self.recent_logs.unwrap_or(defaults.recent_logs),
        }
    }
}
