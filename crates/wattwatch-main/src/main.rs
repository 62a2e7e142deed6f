// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of WattWatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use wattwatch_core::{
    DataProvider, HttpProvider, MonitorHandle, SAMPLE_BATTERY_PERCENT, SampleProvider,
    ThreadRngJitter, spawn_monitor,
};
use wattwatch_server::{AppConfig, AppState, load_config, start_server};
use wattwatch_types::{HourlyPrices, MonitorError};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG_PATH: &str = "wattwatch.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Handle command line arguments
    let args: Vec<String> = std::env::args().collect();
    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("WattWatch - household electricity monitoring demo");
                println!("Version: {VERSION}");
                println!();
                println!("Usage: wattwatch [CONFIG_PATH]");
                println!();
                println!("Options:");
                println!("  -h, --help    Print this help message");
                println!("  -v, --version Print version");
                return Ok(());
            }
            "--version" | "-v" => {
                println!("{VERSION}");
                return Ok(());
            }
            _ => {
                // Treated as the config path below
            }
        }
    }

    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config_path = args
        .get(1)
        .map_or(DEFAULT_CONFIG_PATH, String::as_str)
        .to_owned();
    let config = load_config(Path::new(&config_path))?;

    info!("🚀 Starting WattWatch {VERSION}");
    info!("📋 Configuration Summary:");
    info!(
        "   Listen: {}:{}",
        config.server.bind_address, config.server.port
    );
    match &config.provider.base_url {
        Some(url) => info!("   Provider: {url}"),
        None => info!("   Provider: built-in sample data"),
    }
    info!(
        "   High price threshold: {:.1}/kWh",
        config.monitor.high_price_threshold
    );
    info!(
        "   Battery drain: {:.1} pts every {}s of high price",
        config.monitor.battery_drain_step, config.monitor.battery_drain_period_secs
    );
    info!("   Tick interval: {}s", config.monitor.tick_interval_secs);

    let (prices, battery) = startup_data(&config).await;
    let monitor = start_monitor(&config, prices.clone(), battery);
    let state = AppState::new(prices, battery, monitor.state());

    tokio::select! {
        result = start_server(&config.server, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutdown requested");
        }
    }

    monitor.stop().await;
    info!("✅ Shutdown complete");

    Ok(())
}

/// One startup fetch, outside the tick. A failing provider degrades to the
/// built-in sample data with a warning; it never takes the process down.
async fn startup_data(config: &AppConfig) -> (HourlyPrices, f32) {
    let provider: Box<dyn DataProvider> = match &config.provider.base_url {
        Some(url) => Box::new(HttpProvider::new(url.clone())),
        None => Box::new(SampleProvider),
    };

    match fetch_startup_data(provider.as_ref()).await {
        Ok(data) => data,
        Err(e) => {
            warn!("⚠️ {e}, falling back to built-in sample data");
            (HourlyPrices::sample(), SAMPLE_BATTERY_PERCENT)
        }
    }
}

async fn fetch_startup_data(
    provider: &dyn DataProvider,
) -> Result<(HourlyPrices, f32), MonitorError> {
    let prices = provider.hourly_prices().await?;
    let battery = provider.battery_level().await?;
    Ok((prices, battery))
}

fn start_monitor(config: &AppConfig, prices: HourlyPrices, battery: f32) -> MonitorHandle {
    spawn_monitor(
        prices,
        battery,
        config.monitor.clone(),
        Box::new(ThreadRngJitter),
    )
}
