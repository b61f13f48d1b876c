//! homeval - House Price Predictor entry point
//!
//! Serves a pre-trained linear regression model behind a web form and a JSON API.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use homeval_gateway::config::AppConfig;
use homeval_gateway::metrics::MetricsRegistry;
use homeval_gateway::server::{serve, ServiceContext};

/// House price predictor
#[derive(Parser, Debug)]
#[command(name = "homeval")]
#[command(author = "homeval Contributors")]
#[command(version)]
#[command(about = "Serve house price predictions over a web form and JSON API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "homeval.toml")]
    config: String,

    /// HTTP port, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration before logging so its log level can apply
    let config_missing = !std::path::Path::new(&args.config).exists();
    let mut config = if config_missing {
        AppConfig::from_env()?
    } else {
        AppConfig::load(&args.config)?
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    tracing::info!("Starting House Price Predictor v{}", env!("CARGO_PKG_VERSION"));
    if config_missing {
        tracing::warn!("Config file {} not found, using defaults", args.config);
    }

    let metrics = Arc::new(MetricsRegistry::new());
    let ctx = Arc::new(ServiceContext::from_config(&config, metrics));
    if !ctx.is_ready() {
        tracing::warn!("Running in degraded mode, prediction requests will be refused");
    }

    serve(ctx, config.socket_addr()?).await?;

    tracing::info!("{} shutdown complete", config.name);
    Ok(())
}
