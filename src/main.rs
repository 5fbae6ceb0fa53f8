//! cors-relay binary entry point.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cors_relay::config::{load_config, validate_config, RelayConfig};
use cors_relay::RelayServer;

#[derive(Parser, Debug)]
#[command(name = "cors-relay")]
#[command(about = "Local CORS relay for LLM backends", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the backend host.
    #[arg(long)]
    backend_host: Option<String>,

    /// Override the backend port.
    #[arg(long)]
    backend_port: Option<u16>,

    /// Override the static page path.
    #[arg(long)]
    page: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cors_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cors-relay v0.1.0 starting");

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            tracing::info!(path = %path.display(), "Configuration loaded");
            config
        }
        None => RelayConfig::default(),
    };

    // CLI overrides are applied after the file so they always win.
    if let Some(port) = args.port {
        config.listener.set_port(port);
    }
    if let Some(host) = args.backend_host {
        config.backend.host = host;
    }
    if let Some(port) = args.backend_port {
        config.backend.port = port;
    }
    if let Some(page) = args.page {
        config.static_page.path = page;
    }

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "Invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = RelayServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
