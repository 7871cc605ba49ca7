use ralph_dashboard::config::Config;
use ralph_dashboard::logger;
use ralph_dashboard::server::{self, DashboardServer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path (extension optional)
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = DashboardServer::bind(&cfg)?;
    logger::log_server_start(&dashboard.local_addr(), &cfg);

    dashboard.run_until(server::shutdown_signal()).await;
    Ok(())
}
