//! One-shot position lookup used by the startup path.

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::WeatherError, model::Coordinates};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, WeatherError>;
}

/// Coordinates supplied up front (CLI flags or config).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        let Coordinates { latitude, longitude } = self.0;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::Location(format!(
                "coordinates out of range: {latitude}, {longitude}"
            )));
        }
        Ok(self.0)
    }
}

/// Approximate position from the public IP address (ipapi.co compatible).
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        tracing::debug!("Looking up position via {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, concat!("weathercard/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| WeatherError::Location(format!("lookup request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WeatherError::Location(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Location(format!("lookup parse error: {e}")))?;

        if body.error {
            return Err(WeatherError::Location(
                body.reason.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => {
                tracing::info!("Got location: {}, {}", latitude, longitude);
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(WeatherError::Location("lookup returned no coordinates".to_string())),
        }
    }
}
