//! Artifact readers
//!
//! Load the files produced by the iteration loop. Every failure is turned
//! into a sentinel (`None` or an empty tail) at this boundary, and nothing
//! is cached between calls.

mod snapshot;
mod tail;

pub use snapshot::{
    load_json_artifact, read_metrics_file, read_status_file, MetricsSnapshot, StatusSnapshot,
};
pub use tail::{read_recent_logs, tail_lines, LogTail};
