//! Trimmer server binary.
//!
//! Serves `/trimmer` translation and template payloads in front of a small
//! downstream application.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trimmer::config::{load_config, loader::prepare, ServerConfig};
use trimmer::http::HttpServer;
use trimmer::lifecycle::{shutdown_on_ctrl_c, Shutdown};
use trimmer::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "trimmer-server", version, about = "Serve translations and templates as JavaScript")]
struct Args {
    /// Path to a TOML config file; built-in defaults when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => prepare(ServerConfig::default())?,
    };

    logging::init(&config.observability.log_level);
    tracing::info!("trimmer-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        templates_path = %config.trimmer.templates_path.display(),
        default_locale = %config.trimmer.default_locale,
        mode = ?config.trimmer.mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
