use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

use devserve::config::{self, AppState};
use devserve::logger;
use devserve::server::{self, signal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = config::Args::parse();
    let cfg = config::Config::load(&args)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let addr = cfg.resolve_socket_addr().await?;
    let listener = server::create_reusable_listener(addr)?;
    let local_addr = listener.local_addr()?;
    logger::log_server_start(&local_addr, &cfg);

    let state = Arc::new(AppState::new(cfg, local_addr.port()));
    let shutdown = Arc::new(Notify::new());
    signal::start_signal_handler(Arc::clone(&state), Arc::clone(&shutdown))?;

    // The server being ready is the first generate event
    state.announcer.on_generate();

    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}
