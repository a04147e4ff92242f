//! HTTP protocol layer module
//!
//! Content-type inference and response builders, kept apart from the
//! resolution logic in `handler`.

pub mod mime;
pub mod response;

pub use response::{build_found_response, build_io_error_response, build_not_found_response};
