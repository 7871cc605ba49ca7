// Configuration module entry point
// Loads layered configuration and builds the per-server runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{DashboardError, Result};

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, LogLevel, LoggingConfig, PathsConfig, ServerConfig, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_RECENT_LOGS,
};

/// Config file consulted when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "dashboard";

impl Config {
    /// Load configuration from the default config file location
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// Precedence, lowest first: built-in defaults, the config file,
    /// `DASHBOARD_*` environment variables (`__` separates nested keys),
    /// then `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.connection_timeout", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        let raw: types::RawConfig = settings.try_deserialize()?;
        let config = Self {
            server: raw.server,
            paths: raw.paths.resolve(),
            logging: raw.logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot be served
    pub fn validate(&self) -> Result<()> {
        if self.paths.recent_logs == 0 {
            return Err(DashboardError::InvalidSetting {
                key: "paths.recent_logs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.server.workers == Some(0) {
            return Err(DashboardError::InvalidSetting {
                key: "server.workers",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        self.get_socket_addr().map(|_| ())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e: std::net::AddrParseError| {
            DashboardError::InvalidAddress {
                addr,
                reason: e.to_string(),
            }
        })
    }
}
