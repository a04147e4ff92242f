//! Request dispatch module
//!
//! Turns a request into exactly one response: resolve across the roots, then
//! map the outcome to 200 / 404 / 500, trying the favicon and SPA fallbacks
//! before giving up on a missing file.

use crate::config::{AppState, ServerConfig};
use crate::handler::resolver::{self, Resolution, INDEX_FILE};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Request path answered with the bundled favicon when no root has one
pub const FAVICON_REQUEST_PATH: &str = "/favicon.ico";

/// Favicon shipped with the crate
pub const BUNDLED_FAVICON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/favicon.ico");

/// Maps requests onto the configured roots
#[derive(Debug, Clone)]
pub struct Dispatcher {
    roots: Vec<PathBuf>,
    spa_fallback: bool,
    favicon: PathBuf,
}

impl Dispatcher {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            roots: config.roots.clone(),
            spa_fallback: config.spa_fallback,
            favicon: PathBuf::from(BUNDLED_FAVICON),
        }
    }

    /// Use a different default favicon file
    #[must_use]
    pub fn with_favicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.favicon = path.into();
        self
    }

    /// Build the response for a request. The method and body are ignored.
    pub async fn handle<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        let target = req
            .uri()
            .path_and_query()
            .map_or("/", hyper::http::uri::PathAndQuery::as_str);
        let url_path = strip_query(target);

        match resolver::resolve(&self.roots, url_path).await {
            Resolution::Found { path, content } => http::build_found_response(&path, content),
            Resolution::IoError { path, error } => {
                logger::log_error(&format!("Failed to read '{}': {error}", path.display()));
                http::build_io_error_response(&path, &error)
            }
            Resolution::NotFound { path } => self.fallback(target, path).await,
        }
    }

    /// Favicon, then SPA index, then 404.
    ///
    /// The favicon check compares the request target as received, so
    /// `/favicon.ico?v=2` does not get the bundled icon.
    async fn fallback(&self, target: &str, missing: PathBuf) -> Response<Full<Bytes>> {
        let attempt = if target == FAVICON_REQUEST_PATH {
            resolver::read_file(&self.favicon).await
        } else if self.spa_fallback {
            let first_root = self
                .roots
                .first()
                .cloned()
                .unwrap_or_else(|| PathBuf::from(resolver::DEFAULT_ROOT));
            let first_root = std::path::absolute(&first_root).unwrap_or(first_root);
            resolver::read_file(first_root.join(INDEX_FILE)).await
        } else {
            return http::build_not_found_response(&missing);
        };

        match attempt {
            Resolution::Found { path, content } => http::build_found_response(&path, content),
            Resolution::NotFound { path } | Resolution::IoError { path, .. } => {
                http::build_not_found_response(&path)
            }
        }
    }
}

/// Drop everything from the first `?` onward
pub fn strip_query(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // the body is never read
    let (parts, _) = req.into_parts();
    let req = Request::from_parts(parts, ());
    let response = state.dispatcher.handle(&req).await;

    if state.config.logging.access_log {
        let entry = AccessLogEntry::from_exchange(&req, &response, remote_addr)
            .with_duration(started.elapsed())
            .with_body_bytes(response.body().size_hint().exact().unwrap_or(0));
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::fs;
    use tempfile::TempDir;

    fn dispatcher(roots: &[&TempDir], spa_fallback: bool) -> Dispatcher {
        let config = ServerConfig {
            roots: roots.iter().map(|dir| dir.path().to_path_buf()).collect(),
            spa_fallback,
            ..ServerConfig::default()
        };
        Dispatcher::new(&config)
    }

    fn get(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/app.js?v=3"), "/app.js");
        assert_eq!(strip_query("/a?b?c"), "/a");
        assert_eq!(strip_query("/plain"), "/plain");
        assert_eq!(strip_query("/?"), "/");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("index.html"), "<h1>home</h1>").unwrap();

        let response = dispatcher(&[&public], false).handle(&get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_bytes(response).await, b"<h1>home</h1>");
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("app.js"), "console.log(1)").unwrap();

        let response = dispatcher(&[&public], false)
            .handle(&get("/app.js?cache=bust"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"console.log(1)");
    }

    #[tokio::test]
    async fn test_method_is_not_inspected() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("data.json"), "{}").unwrap();

        let req = Request::builder()
            .method("POST")
            .uri("/data.json")
            .body(())
            .unwrap();
        let response = dispatcher(&[&public], false).handle(&req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
    }

    #[tokio::test]
    async fn test_later_root_serves_file() {
        let dist = TempDir::new().unwrap();
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("robots.txt"), "User-agent: *").unwrap();

        let response = dispatcher(&[&dist, &public], false)
            .handle(&get("/robots.txt"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"User-agent: *");
    }

    #[tokio::test]
    async fn test_unknown_extension_is_text_plain() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("notes.weirdext"), "hello").unwrap();

        let response = dispatcher(&[&public], false)
            .handle(&get("/notes.weirdext"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/plain");
    }

    #[tokio::test]
    async fn test_missing_file_without_spa_is_404() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("index.html"), "home").unwrap();

        let response = dispatcher(&[&public], false).handle(&get("/app.js")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("Content-Type").is_none());
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("/app.js"));
    }

    #[tokio::test]
    async fn test_spa_fallback_uses_first_root_index() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("index.html"), "spa shell").unwrap();

        let response = dispatcher(&[&first, &second], true)
            .handle(&get("/missing"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_bytes(response).await, b"spa shell");
    }

    #[tokio::test]
    async fn test_spa_fallback_ignores_later_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("index.html"), "second shell").unwrap();

        let response = dispatcher(&[&first, &second], true)
            .handle(&get("/client/route"))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains(&first.path().join("index.html").display().to_string()));
    }

    #[tokio::test]
    async fn test_favicon_falls_back_to_bundled() {
        let public = TempDir::new().unwrap();

        for spa_fallback in [false, true] {
            let response = dispatcher(&[&public], spa_fallback)
                .handle(&get(FAVICON_REQUEST_PATH))
                .await;
            assert_eq!(response.status(), StatusCode::OK);
            let content_type = response.headers()["Content-Type"].to_str().unwrap().to_string();
            assert!(content_type.starts_with("image/"));
            let bundled = fs::read(BUNDLED_FAVICON).unwrap();
            assert_eq!(body_bytes(response).await, bundled);
        }
    }

    #[tokio::test]
    async fn test_favicon_with_query_skips_bundled() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("index.html"), "spa shell").unwrap();

        let response = dispatcher(&[&public], true)
            .handle(&get("/favicon.ico?v=2"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_bytes(response).await, b"spa shell");

        let response = dispatcher(&[&public], false)
            .handle(&get("/favicon.ico?v=2"))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_favicon_wins_over_bundled() {
        let public = TempDir::new().unwrap();
        fs::write(public.path().join("favicon.ico"), "custom icon").unwrap();

        let response = dispatcher(&[&public], false)
            .handle(&get(FAVICON_REQUEST_PATH))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"custom icon");
    }

    #[tokio::test]
    async fn test_missing_bundled_favicon_is_404() {
        let public = TempDir::new().unwrap();
        let missing = public.path().join("no-such-favicon.ico");

        let response = dispatcher(&[&public], true)
            .with_favicon(&missing)
            .handle(&get(FAVICON_REQUEST_PATH))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("no-such-favicon.ico"));
    }

    #[tokio::test]
    async fn test_directory_without_slash_is_500() {
        let public = TempDir::new().unwrap();
        fs::create_dir(public.path().join("assets")).unwrap();

        let response = dispatcher(&[&public], true).handle(&get("/assets")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get("Content-Type").is_none());
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("assets"));
    }

    #[tokio::test]
    async fn test_handle_request_never_fails() {
        let public = TempDir::new().unwrap();
        let mut config = crate::config::Config::default();
        config.server.roots = vec![public.path().to_path_buf()];
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config, 10001));

        let response = handle_request(get("/nothing"), state, "127.0.0.1:5555".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
