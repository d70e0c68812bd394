use std::sync::Arc;

use clap::Parser;

use htp_testbed::config::{self, AppState, Config};
use htp_testbed::logger;
use htp_testbed::server::{create_listener, shutdown_signal, start_server_loop};

/// Demo backend: echo text, decode JSON, set headers, encode JSON, read queries
#[derive(Debug, Parser)]
#[command(name = "htp-backend", version)]
struct Args {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;
    logger::init(&cfg)?;

    // Tokio runtime, worker count from config when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg));

    logger::log_server_start(&listener.local_addr()?, &cfg, &state.routes);

    let still_active = start_server_loop(listener, state, shutdown_signal()).await;
    if still_active > 0 {
        logger::write_info(&format!(
            "[ BACKEND ] {still_active} connection(s) still open at exit"
        ));
    }
    Ok(())
}
