//! Finboard main entry point

use anyhow::Context;
use clap::Parser;
use finboard_api::{start_server, AppState};
use finboard_config::Config;
use finboard_core::Dashboard;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(author = "Finboard Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A small self-hosted personal finance dashboard", long_about = None)]
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

    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    // The logger needs the configured level, so config loading itself is not logged
    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let dashboard = Dashboard::from_config(&config)
            .await
            .context("Failed to load dashboard data")?;
        log::info!(
            "Dashboard ready: {} transactions, {} payables, {} receivables",
            dashboard.transactions.len(),
            dashboard.payables.len(),
            dashboard.receivables.len()
        );

        let state = AppState::new(config, dashboard);
        start_server(state).await.context("Server error")
    })
}
