// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 10001;
pub const DEFAULT_ACCESS_LOG_FORMAT: &str = "combined";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Server configuration, fixed for the lifetime of the process
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ServerConfig {
    /// Root directories, tried in order
    pub roots: Vec<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Serve the first root's `index.html` for unmatched paths
    pub spa_fallback: bool,
    /// Open the browser on the first generate event
    pub open: bool,
    /// Print the root-to-URL banner on the first generate event
    pub verbose: bool,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(crate::handler::resolver::DEFAULT_ROOT)],
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            spa_fallback: false,
            open: false,
            verbose: true,
            workers: None,
        }
    }
}

impl ServerConfig {
    /// Serving URL, e.g. `http://localhost:10001`
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: DEFAULT_ACCESS_LOG_FORMAT.to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
