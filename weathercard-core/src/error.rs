//! Error types shared by the client, normalization and presenter.

use reqwest::StatusCode;
use thiserror::Error;

use crate::validate::CityError;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Built with the request URL stripped, since it carries the API key.
    #[error("Network error: {0}")]
    Http(reqwest::Error),

    #[error("Weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Weather provider reported an error: {message}")]
    Provider { message: String },

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    InvalidCity(#[from] CityError),

    #[error("Location unavailable: {0}")]
    Location(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl WeatherError {
    /// Text shown in the transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            Self::Http(_) => "Network error. Check your connection.".to_string(),
            Self::Status { status, .. } => status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string()),
            Self::Provider { message } => message.clone(),
            Self::MalformedResponse(_) => "Unexpected response from weather service".to_string(),
            Self::InvalidCity(e) => e.to_string(),
            Self::Location(_) => "Could not determine your location".to_string(),
            Self::InvalidUrl(_) => "Weather service is misconfigured".to_string(),
        }
    }
}
