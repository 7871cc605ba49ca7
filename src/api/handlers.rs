// Status aggregation handler

use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::types::AggregatedStatus;
use crate::config::{AppState, PathsConfig};
use crate::http;
use crate::readers::{read_metrics_file, read_recent_logs, read_status_file};

/// Read all three artifacts concurrently and merge them
///
/// The reads are independent: a missing or corrupt metrics or log file
/// only degrades its own field.
pub async fn collect_status(paths: &PathsConfig) -> AggregatedStatus {
    let (status, metrics, recent_logs) = tokio::join!(
        read_status_file(&paths.status_file),
        read_metrics_file(&paths.metrics_file),
        read_recent_logs(&paths.log_file, paths.recent_logs),
    );

    match status {
        Some(status) => AggregatedStatus::active(status, metrics, recent_logs, Utc::now()),
        None => AggregatedStatus::inactive(),
    }
}

/// GET /api/status
pub async fn handle_status(state: &AppState) -> Response<Full<Bytes>> {
    let aggregated = collect_status(&state.paths).await;
    http::build_json_response(StatusCode::OK, &aggregated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PathsConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("logs")).unwrap();
        let paths = PathsConfig::rooted_at(dir.path());
        (dir, paths)
    }

    #[tokio::test]
    async fn test_no_files_is_inactive() {
        let (_dir, paths) = fixture();
        let aggregated = collect_status(&paths).await;
        assert_eq!(aggregated, AggregatedStatus::inactive());
    }

    #[tokio::test]
    async fn test_malformed_status_is_inactive_even_with_metrics() {
        let (_dir, paths) = fixture();
        fs::write(&paths.status_file, "{ invalid json }").unwrap();
        fs::write(&paths.metrics_file, r#"{"total_iterations": 3}"#).unwrap();
        fs::write(&paths.log_file, "line\n").unwrap();

        let aggregated = collect_status(&paths).await;
        assert!(!aggregated.is_active());
        assert_eq!(aggregated.error(), Some("No loop running"));
        assert!(aggregated.metrics().is_none());
        assert!(aggregated.recent_logs().is_none());
    }

    #[tokio::test]
    async fn test_null_status_is_inactive() {
        let (_dir, paths) = fixture();
        fs::write(&paths.status_file, "null").unwrap();
        fs::write(&paths.metrics_file, r#"{"total_iterations": 3}"#).unwrap();

        let aggregated = collect_status(&paths).await;
        assert!(!aggregated.is_active());
        assert_eq!(aggregated.error(), Some("No loop running"));
        assert!(aggregated.status().is_none());
    }

    #[tokio::test]
    async fn test_all_artifacts_present() {
        let (_dir, paths) = fixture();
        let status = json!({"current_iteration": 5, "status": "running"});
        let metrics = json!({"total_iterations": 10, "failed": 2});
        fs::write(&paths.status_file, status.to_string()).unwrap();
        fs::write(&paths.metrics_file, metrics.to_string()).unwrap();
        fs::write(
            &paths.log_file,
            "[2026-01-29T10:29:00Z] START - Iteration 5\n\n[2026-01-29T10:30:00Z] SUCCESS - Task completed\n",
        )
        .unwrap();

        let aggregated = collect_status(&paths).await;
        assert!(aggregated.is_active());
        assert_eq!(aggregated.status(), Some(&status));
        assert_eq!(aggregated.metrics(), Some(&Some(metrics)));
        assert_eq!(aggregated.recent_logs().map(<[String]>::len), Some(2));
        assert!(aggregated.last_update().is_some());
    }

    #[tokio::test]
    async fn test_metrics_and_logs_degrade_independently() {
        let (_dir, paths) = fixture();
        fs::write(&paths.status_file, r#"{"status": "running"}"#).unwrap();
        fs::write(&paths.metrics_file, "not json").unwrap();

        let aggregated = collect_status(&paths).await;
        assert!(aggregated.is_active());
        assert_eq!(aggregated.metrics(), Some(&None));
        assert_eq!(aggregated.recent_logs(), Some(&[][..]));
    }

    #[tokio::test]
    async fn test_window_size_respected() {
        let (_dir, mut paths) = fixture();
        paths.recent_logs = 3;
        fs::write(&paths.status_file, "{}").unwrap();
        let log: String = (1..=10).map(|i| format!("entry {i}\n")).collect();
        fs::write(&paths.log_file, log).unwrap();

        let aggregated = collect_status(&paths).await;
        assert_eq!(
            aggregated.recent_logs().unwrap(),
            ["entry 8", "entry 9", "entry 10"]
        );
    }
}
