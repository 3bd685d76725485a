use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod display;
mod models;
mod services;
mod utils;

use config::{Cli, Config};
use display::InkDisplay;
use models::DisplayConfig;
use services::render_service::Readout;
use services::{odometer_service, output_service, price_service, render_service};
use utils::AppError;

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    config.apply_cli(&cli)?;
    debug!("Configuration: {:?}", config);

    if cli.refresh_fixture {
        let path = price_service::refresh_fixture(&config).await?;
        println!("Saved price fixture to {}", path.display());
        return Ok(());
    }

    let response = price_service::fetch_prices(&config).await?;
    let entries = price_service::hourly_prices(response);

    let now = Local::now().naive_local();
    let window = price_service::select_window(&entries, config.hours, now);
    info!("Next {} hours:", window.len());
    for entry in &window {
        info!("  {} - {:.3} {}", entry.local_timestamp, entry.total_price, entry.unit);
    }

    let readout = Readout {
        expected_odometer: odometer_service::estimate_for(&config.lease, now.date()),
        unit: config.lease.unit.clone(),
    };
    info!("Expected odometer: {} {}", readout.expected_odometer, readout.unit);

    // No panel driver is linked into this build; hardware backends plug in
    // here by implementing InkDisplay.
    let panel: Option<&mut dyn InkDisplay> = None;
    let display_config = panel
        .as_ref()
        .map(|p| DisplayConfig::for_resolution(p.resolution()))
        .unwrap_or_default();

    let image = render_service::render(&window, &display_config, &readout);
    output_service::emit(&image, panel, &config.output_path)?;

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("elpris_ink=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    info!("⚡ Starting elpris-ink v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
