use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::{
    appearance::appearance_for,
    error::WeatherError,
    model::{DisplayModel, WeatherResponse},
};

/// Correction subtracted from the provider's UTC offset before converting timestamps.
pub const DEFAULT_CLOCK_CORRECTION_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

/// Convert a provider payload into a [`DisplayModel`].
///
/// Timestamps are shifted by `timezone - clock_correction_secs` and kept as
/// naive wall-clock values.
pub fn normalize(
    response: &WeatherResponse,
    clock_correction_secs: i64,
) -> Result<DisplayModel, WeatherError> {
    let parsed = OwCurrentResponse::deserialize(response.as_json())
        .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MalformedResponse("empty `weather` array".to_string()))?;

    let offset = parsed.timezone.saturating_sub(clock_correction_secs);
    let appearance = appearance_for(&condition.icon);

    Ok(DisplayModel {
        city: parsed.name,
        local_time: shifted(parsed.dt, offset, "dt")?,
        sunrise: shifted(parsed.sys.sunrise, offset, "sys.sunrise")?,
        sunset: shifted(parsed.sys.sunset, offset, "sys.sunset")?,
        temperature: format!("{}°", round_half_up(parsed.main.temp)),
        pressure: format!("{}hPa", format_number(parsed.main.pressure)),
        description: condition.description,
        icon: appearance.icon.to_string(),
        gradient: appearance.gradient(),
        condition_code: condition.icon,
    })
}

fn shifted(ts: i64, offset: i64, field: &str) -> Result<NaiveDateTime, WeatherError> {
    ts.checked_add(offset)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| WeatherError::MalformedResponse(format!("`{field}` out of range: {ts}")))
}

/// Halves round toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
