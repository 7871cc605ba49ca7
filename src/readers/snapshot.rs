//! JSON snapshot readers
//!
//! `load_json_artifact` reports why a snapshot is unavailable;
//! `read_status_file` and `read_metrics_file` collapse every failure to
//! `None` so callers only branch on available/unavailable.

use serde_json::Value;
use std::path::Path;
use tokio::fs;

use crate::error::ArtifactError;
use crate::logger;

/// Current run as written by the iteration loop. Passed through untouched.
pub type StatusSnapshot = Value;

/// Aggregate counters as written by the iteration loop. Passed through untouched.
pub type MetricsSnapshot = Value;

/// Read and parse a JSON artifact, keeping the failure reason
///
/// Snapshots are JSON objects; any other top-level value is rejected.
pub async fn load_json_artifact(path: &Path) -> Result<Value, ArtifactError> {
    let content = fs::read(path).await?;
    let value: Value = serde_json::from_slice(&content)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ArtifactError::NotAnObject {
            found: json_kind(&value),
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read the status snapshot, or `None` if it is missing, unreadable or malformed
pub async fn read_status_file(path: &Path) -> Option<StatusSnapshot> {
    read_snapshot(path, "status").await
}

/// Read the metrics snapshot, or `None` if it is missing, unreadable or malformed
pub async fn read_metrics_file(path: &Path) -> Option<MetricsSnapshot> {
    read_snapshot(path, "metrics").await
}

async fn read_snapshot(path: &Path, kind: &str) -> Option<Value> {
    match load_json_artifact(path).await {
        Ok(value) => Some(value),
        Err(e) => {
            logger::log_debug(&format!(
                "{kind} file '{}' unavailable: {e}",
                path.display()
            ));
            None
        }
    }
}
