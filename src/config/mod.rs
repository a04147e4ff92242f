// Configuration module entry point
// Layers defaults, config file, environment and command line into one Config

mod cli;
mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

pub use cli::Args;
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

use crate::handler::resolver::DEFAULT_ROOT;

/// Environment variable prefix, e.g. `DEVSERVE_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "DEVSERVE";

impl Config {
    /// Load configuration for the given command line.
    ///
    /// Precedence, lowest first: built-in defaults, the config file named by
    /// `--config` (missing file is fine), `DEVSERVE_*` environment variables,
    /// then command line flags.
    pub fn load(args: &Args) -> Result<Self, config::ConfigError> {
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.roots")
            .try_parsing(true);

        Self::load_with(args, Some(environment))
    }

    fn load_with(
        args: &Args,
        environment: Option<config::Environment>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.roots", vec![DEFAULT_ROOT])?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.spa_fallback", false)?
            .set_default("server.open", false)?
            .set_default("server.verbose", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", types::DEFAULT_ACCESS_LOG_FORMAT)?
            .add_source(config::File::from(args.config.as_path()).required(false));

        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }

        let roots = (!args.roots.is_empty()).then(|| {
            args.roots
                .iter()
                .map(|root| root.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        });

        let settings = builder
            .set_override_option("server.roots", roots)?
            .set_override_option("server.host", args.host.clone())?
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option("server.spa_fallback", args.spa.then_some(true))?
            .set_override_option("server.open", args.open.then_some(true))?
            .set_override_option("server.verbose", args.quiet.then_some(false))?
            .set_override_option("server.workers", args.workers.map(i64::from))?
            .set_override_option("logging.access_log", args.no_access_log.then_some(false))?
            .set_override_option("logging.access_log_format", args.access_log_format.clone())?
            .set_override_option("logging.access_log_file", args.access_log_file.clone())?
            .set_override_option("logging.error_log_file", args.error_log_file.clone())?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        Ok(config.validate())
    }

    /// Normalize values the loaders cannot express
    #[must_use]
    pub fn validate(mut self) -> Self {
        if self.server.roots.is_empty() {
            self.server.roots = vec![PathBuf::from(DEFAULT_ROOT)];
        }
        if self.server.workers == Some(0) {
            self.server.workers = None;
        }
        self
    }

    /// Resolve `host:port` to the first socket address the resolver returns
    pub async fn resolve_socket_addr(&self) -> std::io::Result<SocketAddr> {
        let target = format!("{}:{}", self.server.host, self.server.port);
        let addr = tokio::net::lookup_host(&target).await?.next();
        addr.ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("No address found for {target}"),
            )
        })
    }
}
