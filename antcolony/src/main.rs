mod app;
mod config;
mod engine;
mod headless;
mod timer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::AntApp;
use clap::Parser;
use config::{AppConfig, window_conf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the ant colony simulation.
#[derive(Parser)]
#[command(name = "antcolony", version, about = "Multi-colony ant foraging simulation")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a window and print a TOML report.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so the headless report on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_seed(cli.seed);

    if let Some(ticks) = cli.headless {
        let report = headless::run(&config, ticks);
        let text = toml::to_string(&report).context("Failed to serialize headless report")?;
        print!("{text}");
        return Ok(());
    }

    info!("Starting viewer");
    macroquad::Window::from_config(window_conf(), async move {
        let mut app = AntApp::new(config);
        app.run().await;
    });
    Ok(())
}
