// Application state module
// Immutable per-server state shared by every connection task

use super::types::{Config, PathsConfig};

/// Application state
///
/// Built once per server from its `Config`. Holds no file handles or
/// cached artifact contents; every request reads the artifacts afresh.
#[derive(Debug, Clone)]
pub struct AppState {
    pub paths: PathsConfig,
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            paths: config.paths.clone(),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
        }
    }
}
