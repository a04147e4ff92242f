//! Request handler module
//!
//! Resolution of URL paths against the root directories, and the dispatch
//! policy that turns each outcome into a response.

pub mod dispatcher;
pub mod resolver;

// Re-export main entry point
pub use dispatcher::{handle_request, Dispatcher};
pub use resolver::{resolve, Resolution};
