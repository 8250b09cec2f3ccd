use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod env;
mod handler;
mod logger;
mod report;
mod response;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(config::AppState::new(&cfg));
    let connections = Arc::new(AtomicUsize::new(0));

    // Startup banner announces the deployment environment (or not_set)
    let snapshot = env::EnvSnapshot::capture();
    logger::log_server_start(&addr, &cfg, snapshot.value_or_default(env::ENVIRONMENT));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                server::accept_connection(stream, peer_addr, &state, &connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
