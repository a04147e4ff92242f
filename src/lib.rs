//! Development static file server.
//!
//! Files are looked up across an ordered list of root directories; the first
//! root containing the requested file wins. Directory requests map to
//! `index.html`, `/favicon.ico` falls back to a bundled icon, and unmatched
//! paths can fall back to the first root's `index.html` for client-side
//! routed apps.
//!
//! ```no_run
//! use devserve::config::{AppState, Config};
//! use devserve::server;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let listener = server::create_reusable_listener(config.resolve_socket_addr().await?)?;
//! let port = listener.local_addr()?.port();
//! let state = Arc::new(AppState::new(config, port));
//! state.announcer.on_generate();
//! server::start_server_loop(listener, state, Arc::new(tokio::sync::Notify::new())).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
