// Command line arguments
// Every flag is optional and only overrides what the file/env layers set

use clap::Parser;
use std::path::PathBuf;

/// Serve static files from one or more roots during development
#[derive(Debug, Parser)]
#[command(name = "devserve", version, about)]
pub struct Args {
    /// Root directories, tried in order (default: current directory)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", default_value = "devserve.toml")]
    pub config: PathBuf,

    /// Host name to bind and advertise
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Serve the first root's index.html for paths that match no file
    #[arg(long)]
    pub spa: bool,

    /// Open the browser once the server is ready
    #[arg(short, long)]
    pub open: bool,

    /// Do not print the serving URLs (also disables --open)
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of Tokio worker threads
    #[arg(long)]
    pub workers: Option<u32>,

    /// Disable the per-request access log
    #[arg(long)]
    pub no_access_log: bool,

    /// Access log format: combined, common, json, or a custom pattern
    #[arg(long, value_name = "FORMAT")]
    pub access_log_format: Option<String>,

    /// Append access log lines to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub access_log_file: Option<String>,

    /// Append error log lines to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub error_log_file: Option<String>,
}
