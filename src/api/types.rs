// API type definitions
// Wire shape of the /api/status response

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::readers::{LogTail, MetricsSnapshot, StatusSnapshot};

/// Error message reported whenever the status artifact is unavailable
pub const NO_LOOP_RUNNING: &str = "No loop running";

/// Response of `GET /api/status`
///
/// Inactive responses carry only `active` and `error`; active responses
/// carry everything else, with `metrics` serialized as `null` when the
/// metrics artifact is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStatus {
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StatusSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Option<MetricsSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recent_logs: Option<LogTail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AggregatedStatus {
    /// A loop is running; `assembled_at` is when this response was built
    pub fn active(
        status: StatusSnapshot,
        metrics: Option<MetricsSnapshot>,
        recent_logs: LogTail,
        assembled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            active: true,
            status: Some(status),
            metrics: Some(metrics),
            recent_logs: Some(recent_logs),
            last_update: Some(assembled_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            error: None,
        }
    }

    /// No status artifact could be read
    pub fn inactive() -> Self {
        Self {
            active: false,
            status: None,
            metrics: None,
            recent_logs: None,
            last_update: None,
            error: Some(NO_LOOP_RUNNING.to_string()),
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn status(&self) -> Option<&StatusSnapshot> {
        self.status.as_ref()
    }

    /// `None` when inactive, `Some(None)` when active without metrics
    pub const fn metrics(&self) -> Option<&Option<MetricsSnapshot>> {
        self.metrics.as_ref()
    }

    pub fn recent_logs(&self) -> Option<&[String]> {
        self.recent_logs.as_deref()
    }

    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
