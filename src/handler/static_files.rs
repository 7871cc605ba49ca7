//! Static file serving module
//!
//! Serves the front-end bundle from the public directory. Missing files
//! are normal: the root document falls back to a placeholder page and
//! everything else answers 404.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const INDEX_FILE: &str = "index.html";

/// Served for `GET /` until the front-end build has produced `index.html`
pub const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Ralph Dashboard</title>
</head>
<body>
  <h1>Ralph Dashboard</h1>
  <p>The dashboard front-end has not been built yet.</p>
  <p>Loop state is available as JSON at <a href="/api/status">/api/status</a>.</p>
</body>
</html>
"#;

/// Serve `index.html` verbatim, or the placeholder page. Never fails.
pub async fn serve_index(public_dir: &Path) -> Response<Full<Bytes>> {
    let index_path = public_dir.join(INDEX_FILE);
    match fs::read(&index_path).await {
        Ok(content) => http::build_html_response(content),
        Err(e) => {
            logger::log_debug(&format!(
                "'{}' unavailable, serving placeholder: {e}",
                index_path.display()
            ));
            http::build_html_response(PLACEHOLDER_HTML)
        }
    }
}

/// Serve any other file under the public directory
pub async fn serve_public(public_dir: &Path, request_path: &str) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_public_path(public_dir, request_path).await else {
        return http::build_404_response();
    };

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(Path::new(request_path));
            http::build_file_response(Bytes::from(content), content_type)
        }
        Err(e) => {
            // Directories land here too
            logger::log_debug(&format!(
                "Failed to read '{}': {e}",
                file_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Map a request path onto an existing path inside `public_dir`
///
/// The path is percent-decoded first. Any decoded segment containing `..`
/// is rejected before touching the filesystem, then the canonical result
/// must stay under the canonical public root, which also stops symlinks
/// pointing outside it.
pub async fn resolve_public_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
        logger::log_debug(&format!("Undecodable request path: {request_path}"));
        return None;
    };
    let relative = decoded.trim_start_matches('/');
    if relative.is_empty() || relative.contains('\0') {
        return None;
    }

    if relative
        .split(['/', '\\'])
        .any(|segment| segment.contains(".."))
    {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    let root = match fs::canonicalize(public_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_debug(&format!(
                "Public directory '{}' inaccessible: {e}",
                public_dir.display()
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log
    let candidate = fs::canonicalize(root.join(relative)).await.ok()?;
    if !candidate.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            candidate.display()
        ));
        return None;
    }

    Some(candidate)
}
