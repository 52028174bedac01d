//! Rampview main entry point

use anyhow::Context;
use clap::Parser;
use rampview_api::start_server;
use rampview_config::Config;
use rampview_core::{build_coordinator, BackendRef, InMemoryBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "rampview")]
#[command(author = "Rampview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight transactions viewer with employee filtering", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = if args.config.exists() {
            Config::load(&args.config).await.map_err(|e| {
                eprintln!("{}", e.to_details());
                e
            })?
        } else {
            Config::default()
        };

        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
        )
        .init();

        if args.config.exists() {
            log::info!("Config loaded from {}", args.config.display());
        } else {
            log::warn!("Config file not found: {}, using defaults", args.config.display());
        }

        let backend = InMemoryBackend::from_config(&config.backend)
            .await
            .context("failed to initialize backend")?;
        let backend: BackendRef = Arc::new(backend);
        let coordinator = build_coordinator(&config, backend);

        start_server(config, coordinator).await.context("server error")?;
        Ok::<(), anyhow::Error>(())
    })
}
