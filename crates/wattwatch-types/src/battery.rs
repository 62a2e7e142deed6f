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

use serde::{Deserialize, Serialize};

/// Displayed battery percentage, kept within `[0, 100]`.
///
/// The tracker only ever drains it; it never increments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatteryLevel(f32);

impl BatteryLevel {
    pub fn new(percent: f32) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    pub fn percent(self) -> f32 {
        self.0
    }

    /// Drain by `step` percentage points, flooring at 0.
    pub fn drain(&mut self, step: f32) {
        self.0 = (self.0 - step).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_readings_are_clamped() {
        assert_eq!(BatteryLevel::new(120.0).percent(), 100.0);
        assert_eq!(BatteryLevel::new(-3.0).percent(), 0.0);
    }

    #[test]
    fn drain_floors_at_zero() {
        let mut level = BatteryLevel::new(0.3);
        level.drain(0.2);
        assert!((level.percent() - 0.1).abs() < 1e-6);
        level.drain(0.2);
        assert_eq!(level.percent(), 0.0);
    }
}
