use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::CityQuery;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates(Coordinates),
    City(CityQuery),
}

impl WeatherQuery {
    /// Provider-relative query suffix, e.g. `weather?q=Paris`.
    pub fn suffix(&self) -> String {
        match self {
            Self::Coordinates(c) => format!("weather?lat={}&lon={}", c.latitude, c.longitude),
            Self::City(city) => format!("weather?q={city}"),
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates(c) => write!(f, "{}, {}", c.latitude, c.longitude),
            Self::City(city) => write!(f, "{city}"),
        }
    }
}

/// Provider payload as received. Only interpreted by [`crate::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResponse(pub Value);

impl WeatherResponse {
    /// Provider-level error text carried in a successful HTTP response.
    pub fn message(&self) -> Option<String> {
        match self.0.get("message")? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Render-ready snapshot of one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub city: String,
    pub local_time: NaiveDateTime,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    pub temperature: String,
    pub pressure: String,
    pub description: String,
    pub condition_code: String,
    pub icon: String,
    pub gradient: String,
}

impl DisplayModel {
    pub fn date(&self) -> String {
        self.local_time.format("%d.%m.%Y").to_string()
    }

    pub fn hour(&self) -> String {
        self.local_time.format("%H:%M").to_string()
    }
}
