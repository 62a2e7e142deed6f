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

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use wattwatch_types::{
    BatteryLevel, DEFAULT_HIGH_PRICE_THRESHOLD, HourlyPrices, NotificationEvent, NotificationKind,
};

use crate::jitter::JitterSource;

/// Configuration for the live monitor.
///
/// All fields default to the demo constants, so an empty `[monitor]`
/// config section behaves like the original dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Boundary for the high-price classification (strictly greater-than).
    #[serde(default = "default_high_price_threshold")]
    pub high_price_threshold: f32,

    /// Symmetric amplitude of the display smoothing jitter.
    #[serde(default = "default_jitter_amplitude")]
    pub jitter_amplitude: f32,

    /// Percentage points drained from the displayed battery per drain tick.
    #[serde(default = "default_battery_drain_step")]
    pub battery_drain_step: f32,

    /// Drain cadence: the drain fires on ticks where
    /// `second % battery_drain_period_secs == 0`, not on its own timer.
    #[serde(default = "default_battery_drain_period_secs")]
    pub battery_drain_period_secs: u32,

    /// Evaluation cadence of the monitor task.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

fn default_high_price_threshold() -> f32 {
    DEFAULT_HIGH_PRICE_THRESHOLD
}

fn default_jitter_amplitude() -> f32 {
    0.1
}

fn default_battery_drain_step() -> f32 {
    0.2
}

fn default_battery_drain_period_secs() -> u32 {
    5
}

fn default_tick_interval_secs() -> u64 {
    1
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            high_price_threshold: default_high_price_threshold(),
            jitter_amplitude: default_jitter_amplitude(),
            battery_drain_step: default_battery_drain_step(),
            battery_drain_period_secs: default_battery_drain_period_secs(),
            tick_interval_secs: default_tick_interval_secs(),
        }
    }
}

/// Snapshot of everything the presentation layer renders, refreshed once
/// per tick. All mutation happens inside the tick, behind one lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorState {
    /// Current hour's price with display jitter applied.
    pub displayed_price: f32,

    /// Whether the current hour is classified as high-price.
    pub is_high_price: bool,

    /// Displayed battery percentage, drained during high-price hours.
    pub battery: BatteryLevel,

    /// Held advisory, at most one; overwritten or cleared every tick.
    pub notification: Option<NotificationEvent>,

    pub updated_at: DateTime<Utc>,
}

impl MonitorState {
    pub fn new(initial_battery: f32) -> Self {
        Self {
            displayed_price: 0.0,
            is_high_price: false,
            battery: BatteryLevel::new(initial_battery),
            notification: None,
            updated_at: Utc::now(),
        }
    }
}

/// Run one evaluation of the threshold notifier and battery tracker.
///
/// `now` is the wall-clock time of day; the hour selects the price point
/// and the second gates the battery drain. The jitter decorates the
/// displayed price only, the crossing decision always uses the raw series
/// values.
pub fn evaluate_tick(
    state: &mut MonitorState,
    prices: &HourlyPrices,
    now: NaiveTime,
    config: &MonitorConfig,
    jitter: &mut dyn JitterSource,
) {
    let current_hour = now.hour();
    let current = prices.point_at(current_hour);
    let next = prices.point_at(HourlyPrices::next_hour(current_hour));

    state.displayed_price = current.price + jitter.sample(config.jitter_amplitude);

    let current_is_high = current.is_high(config.high_price_threshold);
    let next_is_high = next.is_high(config.high_price_threshold);

    if current_is_high == next_is_high {
        state.notification = None;
    } else {
        let kind = if next_is_high {
            NotificationKind::Rising
        } else {
            NotificationKind::Falling
        };
        let event = NotificationEvent::for_next_hour(kind, next);
        // The same crossing re-emits every tick; only log when it first appears.
        if state.notification.as_ref() != Some(&event) {
            info!("🔔 {}: {}", event.title(), event.message());
        }
        state.notification = Some(event);
    }

    state.is_high_price = current_is_high;

    if current_is_high && now.second() % config.battery_drain_period_secs.max(1) == 0 {
        state.battery.drain(config.battery_drain_step);
        debug!(battery = state.battery.percent(), "drained battery during high-price period");
    }

    state.updated_at = Utc::now();
}

/// Handle to the running monitor task.
///
/// [`MonitorHandle::stop`] tears the loop down deterministically and waits
/// for it; dropping the handle closes the shutdown channel, which also ends
/// the loop, just without the join.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    state: Arc<RwLock<MonitorState>>,
}

impl MonitorHandle {
    /// Shared snapshot, readable by the HTTP layer.
    pub fn state(&self) -> Arc<RwLock<MonitorState>> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> MonitorState {
        self.state.read().clone()
    }

    /// Signal the tick loop and wait for it to wind down.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Monitor task failed to shut down cleanly: {e}");
        }
    }
}

/// Spawn the cooperative tick loop driving both the threshold notifier and
/// the battery tracker. One interval, no parallelism; the only lock is the
/// snapshot the handlers read.
pub fn spawn_monitor(
    prices: HourlyPrices,
    initial_battery: f32,
    config: MonitorConfig,
    mut jitter: Box<dyn JitterSource>,
) -> MonitorHandle {
    let state = Arc::new(RwLock::new(MonitorState::new(initial_battery)));
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let tick_state = Arc::clone(&state);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.tick_interval_secs.max(1)));
        info!(
            "⏱️ Monitor running (tick: {}s, threshold: {:.1}/kWh)",
            config.tick_interval_secs.max(1),
            config.high_price_threshold
        );
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Local::now().time();
                    let mut snapshot = tick_state.write();
                    evaluate_tick(&mut snapshot, &prices, now, &config, jitter.as_mut());
                }
                _ = shutdown_rx.changed() => {
                    debug!("Monitor tick loop stopped");
                    break;
                }
            }
        }
    });

    MonitorHandle {
        shutdown,
        task,
        state,
    }
}
