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

pub mod jitter;
pub mod monitor;
pub mod provider;

pub use jitter::{FixedJitter, JitterSource, ThreadRngJitter};
pub use monitor::{MonitorConfig, MonitorHandle, MonitorState, evaluate_tick, spawn_monitor};
pub use provider::{DataProvider, HttpProvider, SAMPLE_BATTERY_PERCENT, SampleProvider};
