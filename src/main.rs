use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trainer_link::commands::Cli;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize logging
    let level = if cli.verbose() {
        "debug".to_string()
    } else {
        config.log.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    // Initialize tokio runtime
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute(config).await })
}
