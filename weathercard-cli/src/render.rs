//! Terminal output: the weather card and transient notifications.

use weathercard_core::{DisplayModel, Notification, Notifier};

/// Human-readable card for one display model.
pub fn card(model: &DisplayModel) -> String {
    format!(
        "{city}  [{icon}]\n  {date}  {hour}\n  {temperature}  {description}\n  Pressure  {pressure}\n  Sunrise   {sunrise}   Sunset {sunset}\n  Background {gradient}",
        city = model.city,
        icon = model.icon,
        date = model.date(),
        hour = model.hour(),
        temperature = model.temperature,
        description = model.description,
        pressure = model.pressure,
        sunrise = model.sunrise.format("%H:%M"),
        sunset = model.sunset.format("%H:%M"),
        gradient = model.gradient,
    )
}

/// Prints notifications to stderr so they never mix with card output.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("! {}", notification.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn card_contains_all_fields() {
        let at = |h, m| {
            NaiveDate::from_ymd_opt(2023, 11, 14)
                .and_then(|d| d.and_hms_opt(h, m, 0))
                .expect("valid time")
        };
        let model = DisplayModel {
            city: "Paris".into(),
            local_time: at(22, 13),
            sunrise: at(7, 5),
            sunset: at(16, 58),
            temperature: "15°".into(),
            pressure: "1012hPa".into(),
            description: "clear sky".into(),
            condition_code: "01n".into(),
            icon: "moon-outline".into(),
            gradient: "linear-gradient(45deg, rgba(2,0,36,0.5) 0%, rgba(130,130,255,0.6) 60%)".into(),
        };

        let text = card(&model);
        assert!(text.starts_with("Paris  [moon-outline]"));
        assert!(text.contains("14.11.2023  22:13"));
        assert!(text.contains("15°  clear sky"));
        assert!(text.contains("1012hPa"));
        assert!(text.contains("Sunrise   07:05   Sunset 16:58"));
        assert!(text.ends_with("rgba(130,130,255,0.6) 60%)"));
    }
}
