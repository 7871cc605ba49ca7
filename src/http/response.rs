//! HTTP response building module
//!
//! Provides builders for the responses the dashboard emits. CORS headers
//! are attached later by the router, not here.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Body of every 404 response
const NOT_FOUND_BODY: &str = r#"{"error":"Not found"}"#;

/// Build 204 No Content response (CORS preflight)
pub fn build_no_content_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response with a JSON error body
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(CONTENT_LENGTH, NOT_FOUND_BODY.len())
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        })
}

/// Serialize `body` as a JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_raw_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                JSON_CONTENT_TYPE,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
            );
        }
    };

    build_raw_response(status, JSON_CONTENT_TYPE, Bytes::from(json))
}

/// Build 200 HTML response
pub fn build_html_response(content: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_raw_response(StatusCode::OK, HTML_CONTENT_TYPE, content.into())
}

/// Build 200 response for a file served verbatim
pub fn build_file_response(data: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    build_raw_response(StatusCode::OK, content_type, data)
}

fn build_raw_response(
    status: StatusCode,
    content_type: &str,
    data: Bytes,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, data.len())
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
