//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! dashboard's routes.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cors::apply_cors_headers;
pub use response::{
    build_404_response, build_file_response, build_html_response, build_json_response,
    build_no_content_response,
};
