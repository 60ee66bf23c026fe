//! Student score prediction server.
//!
//! Loads the model artifact once, then serves `/`, `/health` and `/predict`.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!("{},server=debug,pipeline=debug", cli.log_level))
            }),
        )
        .init();

    info!("Student score server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from(cli);
    server::run(config).await
}
