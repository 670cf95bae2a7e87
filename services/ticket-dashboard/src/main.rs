//! Ticket dashboard CLI
//!
//! Terminal front end for the ticket automation backend.

use std::path::PathBuf;

use clap::Parser;
use ticket_dashboard::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ticket-dashboard")]
#[command(about = "Polling dashboard for the ticket automation backend")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, base_url={:?}, log_level={:?}",
        args.config,
        args.base_url,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url;
    }

    tracing::info!("Starting ticket dashboard");
    tracing::debug!(
        "Status every {:?}, stats every {:?}",
        config.status.interval,
        config.stats.interval
    );

    ticket_dashboard::run(config).await?;

    Ok(())
}
