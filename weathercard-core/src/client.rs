use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{config::ApiConfig, error::WeatherError, model::WeatherResponse};

#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Issue one request for `query_suffix` (e.g. `weather?q=Paris`) and return the JSON body.
    async fn fetch(&self, query_suffix: &str) -> Result<WeatherResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    units: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api: ApiConfig) -> Self {
        let mut base_url = api.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            base_url,
            api_key: api.api_key,
            units: api.units,
            http: Client::new(),
        }
    }

    /// Full request URL: base, suffix, unit system and key, in that order.
    pub fn request_url(&self, query_suffix: &str) -> Result<Url, WeatherError> {
        let raw = format!(
            "{}{}&units={}&APPID={}",
            self.base_url, query_suffix, self.units, self.api_key
        );

        Url::parse(&raw).map_err(|e| WeatherError::InvalidUrl(format!("{query_suffix}: {e}")))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch(&self, query_suffix: &str) -> Result<WeatherResponse, WeatherError> {
        let url = self.request_url(query_suffix)?;
        tracing::debug!(
            "GET {}{}&units={}&APPID=<redacted>",
            self.base_url,
            query_suffix,
            self.units
        );

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Http(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Http(e.without_url()))?;

        if !status.is_success() {
            tracing::warn!("Weather request for `{}` failed with status {}", query_suffix, status);
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let json = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("body is not JSON: {e}")))?;

        Ok(WeatherResponse(json))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> OpenWeatherClient {
        OpenWeatherClient::new(ApiConfig {
            base_url: base_url.to_string(),
            api_key: "KEY".to_string(),
            units: "metric".to_string(),
        })
    }

    #[test]
    fn request_url_appends_units_and_key() {
        let url = client("https://api.openweathermap.org/data/2.5/")
            .request_url("weather?lat=52.23&lon=21.01")
            .expect("valid url");

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?lat=52.23&lon=21.01&units=metric&APPID=KEY"
        );
    }

    #[test]
    fn request_url_adds_missing_slash_and_encodes_city() {
        let url = client("http://localhost:8080/data/2.5")
            .request_url("weather?q=Zielona Góra")
            .expect("valid url");

        assert_eq!(url.path(), "/data/2.5/weather");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "Zielona Góra".to_string()));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "ł".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
