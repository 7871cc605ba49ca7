//! Error types
//!
//! `DashboardError` covers startup and configuration failures, the only
//! errors allowed to reach the hosting process. `ArtifactError` explains why
//! an artifact could not be loaded; request handling never surfaces it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while configuring or starting the server
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Host/port pair does not form a socket address
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// A setting was parsed but holds an unusable value
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    /// Log file could not be opened
    #[error("cannot open log file '{}': {source}", path.display())]
    Logger {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Socket or runtime I/O failure
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Reason an externally produced artifact is unavailable
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("artifact not found")]
    Missing,

    #[error("artifact unreadable: {0}")]
    Unreadable(#[source] io::Error),

    #[error("artifact is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Parsed, but the top-level value is not an object (e.g. `null`)
    #[error("artifact is JSON {found}, expected an object")]
    NotAnObject { found: &'static str },
}

impl From<io::Error> for ArtifactError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::Missing
        } else {
            Self::Unreadable(err)
        }
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
