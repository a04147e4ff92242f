// Application state module
// Everything a connection task needs, shared read-only behind Arc

use super::types::Config;
use crate::handler::Dispatcher;
use crate::server::announce::Announcer;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    pub announcer: Announcer,
}

impl AppState {
    /// Build state for a server listening on `port`.
    ///
    /// The port is passed separately since it may differ from the configured
    /// one when the OS picked it.
    pub fn new(config: Config, port: u16) -> Self {
        let dispatcher = Dispatcher::new(&config.server);
        let announcer = Announcer::new(&config.server, port);
        Self {
            config,
            dispatcher,
            announcer,
        }
    }
}
