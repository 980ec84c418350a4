//! Bondgate server entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bondgate_server::{Server, ServerConfig};

const DEFAULT_CONFIG_PATH: &str = "config/bondgate.toml";

/// Bondgate bond screening REST server
#[derive(Parser, Debug)]
#[command(name = "bondgate-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to config/bondgate.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host address to bind to (overrides the config file)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<ServerConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.exists().then_some(default)
        }
    };

    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            info!("Using default configuration");
            ServerConfig::default()
        }
    };

    if let Some(host) = &args.host {
        config.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins when set
    let default_filter = if args.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Bondgate Server v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    Server::new(config).start().await?;

    Ok(())
}
