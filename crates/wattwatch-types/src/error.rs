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

use thiserror::Error;

use crate::pricing::HOURS_PER_DAY;

/// Error taxonomy for the monitoring pipeline.
///
/// `InvalidSeriesLength` is a precondition violation and fails fast at load
/// time. `DataUnavailable` is a degraded state: callers fall back to the
/// built-in sample data instead of crashing.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("price series must contain {HOURS_PER_DAY} hourly points, got {actual}")]
    InvalidSeriesLength { actual: usize },

    #[error("data provider unavailable: {0}")]
    DataUnavailable(String),
}
