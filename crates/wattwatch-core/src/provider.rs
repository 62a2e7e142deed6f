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

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use wattwatch_types::{HourlyPrices, MonitorError, PricePoint};

/// Battery percentage reported by the built-in sample provider.
pub const SAMPLE_BATTERY_PERCENT: f32 = 78.0;

/// Source of the day's price series and the starting battery reading.
///
/// Fetched once at startup, outside the tick; a failure degrades to the
/// sample data instead of crashing.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn hourly_prices(&self) -> Result<HourlyPrices, MonitorError>;

    async fn battery_level(&self) -> Result<f32, MonitorError>;
}

/// Built-in data, used when no provider URL is configured or the
/// configured one is unreachable.
#[derive(Debug, Default)]
pub struct SampleProvider;

#[async_trait]
impl DataProvider for SampleProvider {
    async fn hourly_prices(&self) -> Result<HourlyPrices, MonitorError> {
        Ok(HourlyPrices::sample())
    }

    async fn battery_level(&self) -> Result<f32, MonitorError> {
        Ok(SAMPLE_BATTERY_PERCENT)
    }
}

#[derive(Debug, Deserialize)]
struct HourlyDataResponse {
    #[serde(rename = "hourlyData")]
    hourly_data: Vec<PricePoint>,
}

#[derive(Debug, Deserialize)]
struct BatteryResponse {
    battery: f32,
}

/// Client for the mock dashboard API (`/hourlyData`, `/battery`).
#[derive(Debug, Clone)]
pub struct HttpProvider {
    base_url: String,
    client: Client,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, MonitorError> {
        let url = format!("{}{path}", self.base_url);
        debug!("Fetching {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitorError::DataUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MonitorError::DataUnavailable(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MonitorError::DataUnavailable(e.to_string()))
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn hourly_prices(&self) -> Result<HourlyPrices, MonitorError> {
        let response: HourlyDataResponse = self.get_json("/hourlyData").await?;
        // A short series is a precondition violation, not a transport
        // failure; surface it as such.
        HourlyPrices::new(response.hourly_data)
    }

    async fn battery_level(&self) -> Result<f32, MonitorError> {
        let response: BatteryResponse = self.get_json("/battery").await?;
        Ok(response.battery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        let points: Vec<serde_json::Value> = HourlyPrices::sample()
            .points()
            .iter()
            .map(|p| json!({"time": p.time, "price": p.price}))
            .collect();
        json!({ "hourlyData": points })
    }

    #[tokio::test]
    async fn test_hourly_prices_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/hourlyData")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sample_payload().to_string())
            .create_async()
            .await;

        let provider = HttpProvider::new(server.url());
        let prices = provider.hourly_prices().await.unwrap();

        assert_eq!(prices.points().len(), 24);
        assert!((prices.price_at(9) - 12.0).abs() < 1e-6);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_battery_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/battery")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"battery": 98}).to_string())
            .create_async()
            .await;

        let provider = HttpProvider::new(server.url());
        let battery = provider.battery_level().await.unwrap();

        assert!((battery - 98.0).abs() < 1e-6);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_short_series_fails_fast() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/hourlyData")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"hourlyData": [{"time": "00:00", "price": 4.5}]}).to_string())
            .create_async()
            .await;

        let provider = HttpProvider::new(server.url());
        let err = provider.hourly_prices().await.unwrap_err();

        assert!(matches!(err, MonitorError::InvalidSeriesLength { actual: 1 }));
    }

    #[tokio::test]
    async fn test_server_error_is_data_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/battery")
            .with_status(500)
            .create_async()
            .await;

        let provider = HttpProvider::new(server.url());
        let err = provider.battery_level().await.unwrap_err();

        assert!(matches!(err, MonitorError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_sample_provider_returns_builtin_data() {
        let provider = SampleProvider;
        let prices = provider.hourly_prices().await.unwrap();
        assert_eq!(prices.points().len(), 24);
        assert!((provider.battery_level().await.unwrap() - SAMPLE_BATTERY_PERCENT).abs() < 1e-6);
    }
}
