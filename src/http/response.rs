//! HTTP response building module
//!
//! Builds the three responses the dispatcher can produce. Error bodies are
//! plain-text diagnostics meant for a developer looking at the browser.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::io;
use std::path::Path;

use super::mime;

/// Trailer appended to diagnostic bodies so they are recognizable
const SIGNATURE: &str = "(devserve)";

/// Structured fields of an I/O error, dumped into 500 bodies
#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: String,
    os_code: Option<i32>,
    message: String,
}

impl From<&io::Error> for ErrorDetail {
    fn from(error: &io::Error) -> Self {
        Self {
            kind: format!("{:?}", error.kind()),
            os_code: error.raw_os_error(),
            message: error.to_string(),
        }
    }
}

/// Build 200 OK response with the file bytes as-is
pub fn build_found_response(path: &Path, content: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", mime::content_type_for(path))
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response naming the last attempted path
pub fn build_not_found_response(path: &Path) -> Response<Full<Bytes>> {
    let body = format!("404 Not Found\n\n{}\n\n{SIGNATURE}", path.display());
    build_diagnostic_response(StatusCode::NOT_FOUND, body)
}

/// Build 500 Internal Server Error response with the error's fields
pub fn build_io_error_response(path: &Path, error: &io::Error) -> Response<Full<Bytes>> {
    let detail = ErrorDetail::from(error);
    let dump = serde_json::to_string_pretty(&detail).unwrap_or_else(|_| detail.message.clone());
    let body = format!(
        "500 Internal Server Error\n\n{}\n\n{dump}\n\n{SIGNATURE}",
        path.display()
    );
    build_diagnostic_response(StatusCode::INTERNAL_SERVER_ERROR, body)
}

fn build_diagnostic_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let fallback = body.clone();
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut response = Response::new(Full::new(Bytes::from(fallback)));
            *response.status_mut() = status;
            response
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
