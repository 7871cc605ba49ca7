//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight short-circuit,
//! exact path + method matching, uniform CORS headers and access logging.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_entry = state
        .access_log
        .then(|| build_access_entry(&req, remote_addr));
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    drop(req);

    let mut response = route_request(&method, &path, &state).await;
    http::apply_cors_headers(&mut response);

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

/// Route request by method and exact path
async fn route_request(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    // Preflight is answered before any route matching
    if *method == Method::OPTIONS {
        return http::build_no_content_response();
    }
    if *method != Method::GET {
        return http::build_404_response();
    }

    match path {
        api::STATUS_PATH => api::handle_status(state).await,
        "/" => static_files::serve_index(&state.paths.public_dir).await,
        _ => static_files::serve_public(&state.paths.public_dir, path).await,
    }
}

fn build_access_entry<B>(req: &Request<B>, remote_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PathsConfig};
    use http_body_util::BodyExt;
    use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use hyper::StatusCode;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        state: Arc<AppState>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir_all(dir.path().join("logs")).unwrap();
            let mut config = Config::default();
            config.paths = PathsConfig::rooted_at(dir.path());
            config.paths.public_dir = dir.path().join("public");
            config.logging.access_log = false;
            Self {
                state: Arc::new(AppState::new(&config)),
                _dir: dir,
            }
        }

        fn paths(&self) -> &PathsConfig {
            &self.state.paths
        }

        async fn send(&self, method: Method, uri: &str) -> Response<Full<Bytes>> {
            let req = Request::builder().method(method).uri(uri).body(()).unwrap();
            let addr: SocketAddr = "127.0.0.1:50000".parse().unwrap();
            handle_request(req, Arc::clone(&self.state), addr).await.unwrap()
        }
    }

    async fn json_body(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_without_loop() {
        let fx = Fixture::new();
        let response = fx.send(Method::GET, "/api/status").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            json_body(response).await,
            json!({"active": false, "error": "No loop running"})
        );
    }

    #[tokio::test]
    async fn test_status_with_artifacts() {
        let fx = Fixture::new();
        let status = json!({
            "current_iteration": 5,
            "consecutive_failures": 0,
            "status": "running",
            "branch": "feat/dashboard"
        });
        let metrics = json!({"total_iterations": 10, "successful": 8, "failed": 2});
        fs::write(&fx.paths().status_file, status.to_string()).unwrap();
        fs::write(&fx.paths().metrics_file, metrics.to_string()).unwrap();
        fs::write(
            &fx.paths().log_file,
            "[2026-01-29T10:30:00Z] SUCCESS - Task completed\n[2026-01-29T10:29:00Z] START - Iteration 5",
        )
        .unwrap();

        let body = json_body(fx.send(Method::GET, "/api/status").await).await;
        assert_eq!(body["active"], true);
        assert_eq!(body["status"], status);
        assert_eq!(body["metrics"], metrics);
        assert_eq!(body["recentLogs"].as_array().map(Vec::len), Some(2));
        assert!(body["lastUpdate"].is_string());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_query_string_ignored_for_routing() {
        let fx = Fixture::new();
        let response = fx.send(Method::GET, "/api/status?t=123").await;
        assert_eq!(json_body(response).await["active"], false);
    }

    #[tokio::test]
    async fn test_options_short_circuits_any_path() {
        let fx = Fixture::new();
        for uri in ["/api/status", "/", "/does/not/exist"] {
            let response = fx.send(Method::OPTIONS, uri).await;
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            let body = response.into_body().collect().await.unwrap().to_bytes();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unmatched_method_is_json_404() {
        let fx = Fixture::new();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let response = fx.send(method, "/api/status").await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(json_body(response).await, json!({"error": "Not found"}));
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_cors() {
        let fx = Fixture::new();
        let response = fx.send(Method::GET, "/unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(json_body(response).await, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_root_and_static_carry_cors() {
        let fx = Fixture::new();
        fs::create_dir_all(&fx.paths().public_dir).unwrap();
        fs::write(fx.paths().public_dir.join("app.js"), "console.log(1);").unwrap();

        let root = fx.send(Method::GET, "/").await;
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(root.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let script = fx.send(Method::GET, "/app.js").await;
        assert_eq!(script.headers()[CONTENT_TYPE], "text/javascript");
        assert_eq!(script.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_access_entry_fields() {
        let req = Request::builder()
            .uri("/app.js?v=2")
            .header(USER_AGENT, "curl/8.0")
            .body(())
            .unwrap();
        let entry = build_access_entry(&req, "10.0.0.7:41000".parse().unwrap());
        assert_eq!(entry.remote_addr, "10.0.0.7");
        assert_eq!(entry.path, "/app.js");
        assert_eq!(entry.query.as_deref(), Some("v=2"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(entry.referer, None);
    }
}
