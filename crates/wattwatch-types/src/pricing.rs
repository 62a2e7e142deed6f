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

use crate::error::MonitorError;

/// Number of hourly price points in a single day's series.
pub const HOURS_PER_DAY: usize = 24;

/// Default boundary between the low and high price classification,
/// in currency units per kWh. Classification is strictly `price > threshold`.
pub const DEFAULT_HIGH_PRICE_THRESHOLD: f32 = 8.0;

/// Built-in sample day, one price per hour starting at midnight.
const SAMPLE_PRICES: [f32; HOURS_PER_DAY] = [
    4.5, 3.6, 3.0, 3.3, 3.9, 5.4, 6.6, 8.4, 10.5, 12.0, 11.4, 10.5, 9.6, 9.0, 8.4, 7.5, 8.1, 9.6,
    11.4, 10.5, 9.0, 7.5, 6.0, 5.4,
];

/// A single hourly price on the wire format of the mock API
/// (`{"time": "HH:00", "price": n}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Hour label, always `"HH:00"`.
    pub time: String,

    /// Price in currency units per kWh, non-negative.
    pub price: f32,
}

impl PricePoint {
    pub fn new(hour: u32, price: f32) -> Self {
        Self {
            time: format!("{hour:02}:00"),
            price,
        }
    }

    /// Whether this point falls in the high-price classification.
    /// The boundary is strictly greater-than, never greater-or-equal.
    pub fn is_high(&self, threshold: f32) -> bool {
        self.price > threshold
    }
}

/// One day of hourly prices, validated to hold exactly [`HOURS_PER_DAY`]
/// points ordered by hour. Immutable for the lifetime of the day; the hour
/// is derivable from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct HourlyPrices(Vec<PricePoint>);

impl HourlyPrices {
    /// Build a series, failing fast when the provider handed over anything
    /// other than 24 points.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, MonitorError> {
        if points.len() == HOURS_PER_DAY {
            Ok(Self(points))
        } else {
            Err(MonitorError::InvalidSeriesLength {
                actual: points.len(),
            })
        }
    }

    /// The built-in sample day used when no data provider is configured.
    pub fn sample() -> Self {
        Self(
            SAMPLE_PRICES
                .iter()
                .enumerate()
                .map(|(hour, price)| PricePoint::new(hour as u32, *price))
                .collect(),
        )
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    /// Price point for an hour of day. Hours wrap modulo 24, so callers can
    /// pass `hour + 1` for "next hour" and get the midnight wrap for free.
    pub fn point_at(&self, hour: u32) -> &PricePoint {
        &self.0[(hour as usize) % HOURS_PER_DAY]
    }

    pub fn price_at(&self, hour: u32) -> f32 {
        self.point_at(hour).price
    }

    /// Hour following `hour`, wrapping 23 back to 0.
    pub fn next_hour(hour: u32) -> u32 {
        (hour + 1) % 24
    }
}

impl From<HourlyPrices> for Vec<PricePoint> {
    fn from(series: HourlyPrices) -> Self {
        series.0
    }
}

impl TryFrom<Vec<PricePoint>> for HourlyPrices {
    type Error = MonitorError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_series_has_24_labelled_hours() {
        let series = HourlyPrices::sample();
        assert_eq!(series.points().len(), HOURS_PER_DAY);
        assert_eq!(series.point_at(0).time, "00:00");
        assert_eq!(series.point_at(9).time, "09:00");
        assert_eq!(series.point_at(23).time, "23:00");
    }

    #[test]
    fn short_series_is_rejected() {
        let points = (0..10).map(|h| PricePoint::new(h, 1.0)).collect();
        let err = HourlyPrices::new(points).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidSeriesLength { actual: 10 }));
    }

    #[test]
    fn classification_boundary_is_strictly_greater() {
        let at_threshold = PricePoint::new(0, 8.0);
        let above = PricePoint::new(0, 8.01);
        assert!(!at_threshold.is_high(DEFAULT_HIGH_PRICE_THRESHOLD));
        assert!(above.is_high(DEFAULT_HIGH_PRICE_THRESHOLD));
    }

    #[test]
    fn sample_series_high_hours() {
        // Hours 7-14 and 16-20 exceed the threshold; 15 (7.5) does not.
        let series = HourlyPrices::sample();
        let high: Vec<u32> = (0..24)
            .filter(|&h| series.point_at(h).is_high(DEFAULT_HIGH_PRICE_THRESHOLD))
            .collect();
        assert_eq!(high, vec![7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19, 20]);
    }

    #[test]
    fn next_hour_wraps_at_midnight() {
        assert_eq!(HourlyPrices::next_hour(0), 1);
        assert_eq!(HourlyPrices::next_hour(22), 23);
        assert_eq!(HourlyPrices::next_hour(23), 0);
    }

    #[test]
    fn wire_roundtrip_uses_original_field_names() {
        let point = PricePoint::new(8, 10.5);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"time":"08:00","price":10.5}"#);
    }
}
