// API module entry
// JSON endpoints exposed by the dashboard

mod handlers;
mod types;

pub use handlers::{collect_status, handle_status};
pub use types::{AggregatedStatus, NO_LOOP_RUNNING};

/// Path of the status aggregation endpoint
pub const STATUS_PATH: &str = "/api/status";
