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

mod config;

pub use config::{AppConfig, ProviderSettings, ServerSettings, load_config};

use std::sync::Arc;

use anyhow::Result;
use axum::{Json, Router, extract::State, routing::get};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, trace};

use wattwatch_core::MonitorState;
use wattwatch_types::{HourlyPrices, PricePoint};

/// How much each `/battery` call drains the shared counter.
const BATTERY_DRAIN_PER_REQUEST: f32 = 2.0;

/// Shared state for the mock API handlers.
///
/// The battery counter is deliberately mutex-guarded state owned by the
/// router, not a process-wide global: concurrent callers serialize on the
/// lock instead of racing.
#[derive(Debug, Clone)]
pub struct AppState {
    prices: Arc<HourlyPrices>,
    battery: Arc<Mutex<f32>>,
    monitor: Arc<RwLock<MonitorState>>,
}

impl AppState {
    pub fn new(prices: HourlyPrices, battery: f32, monitor: Arc<RwLock<MonitorState>>) -> Self {
        Self {
            prices: Arc::new(prices),
            battery: Arc::new(Mutex::new(battery)),
            monitor,
        }
    }
}

/// Build the mock API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/battery", get(battery_handler))
        .route("/hourlyData", get(hourly_data_handler))
        .route("/live", get(live_handler))
        // The demo frontend is served from elsewhere
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the task is aborted or the listener fails.
///
/// # Errors
/// Returns error if the server fails to bind or serve.
pub async fn start_server(settings: &ServerSettings, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", settings.bind_address, settings.port);
    let app = build_router(state);

    info!("🌐 Starting mock API server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Plaintext liveness probe.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
async fn index_handler() -> &'static str {
    trace!("liveness probe");
    "WattWatch mock API running"
}

#[derive(Debug, Serialize)]
struct BatteryResponse {
    battery: f32,
}

/// Each call observes and drains the shared counter by 2, mirroring the
/// original mock endpoint. No floor: the demo counter may go negative.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
async fn battery_handler(State(state): State<AppState>) -> Json<BatteryResponse> {
    let mut battery = state.battery.lock();
    *battery -= BATTERY_DRAIN_PER_REQUEST;
    debug!(battery = *battery, "battery requested");
    Json(BatteryResponse { battery: *battery })
}

#[derive(Debug, Serialize)]
struct HourlyDataResponse {
    #[serde(rename = "hourlyData")]
    hourly_data: Vec<PricePoint>,
}

/// The day's 24 hourly prices, static for the process lifetime.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
async fn hourly_data_handler(State(state): State<AppState>) -> Json<HourlyDataResponse> {
    debug!("data requested");
    Json(HourlyDataResponse {
        hourly_data: state.prices.points().to_vec(),
    })
}

/// Monitor snapshot for the external presentation layer.
#[expect(clippy::unused_async, reason = "axum handler must be async")]
async fn live_handler(State(state): State<AppState>) -> Json<MonitorState> {
    Json(state.monitor.read().clone())
}
