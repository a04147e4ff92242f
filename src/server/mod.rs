// Server module entry point
// Binding, connection accept loop, signals and the startup announcement

pub mod announce;
pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module gets another name
#[path = "loop.rs"]
pub mod server_loop;

pub use announce::{Announcer, BrowserLauncher, SystemBrowser};
pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
