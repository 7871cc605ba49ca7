//! Ralph Dashboard
//!
//! Read-only HTTP service reporting the state of an external iteration
//! loop. `/api/status` merges the loop's status snapshot, metrics snapshot
//! and log tail into one JSON document; everything else is served from a
//! public directory of front-end assets.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod readers;
pub mod server;

pub use config::Config;
pub use error::{DashboardError, Result};
pub use server::DashboardServer;
