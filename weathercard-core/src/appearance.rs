//! Condition code → icon and background gradient.
//!
//! Codes follow the provider scheme: a two-digit class (`01` clear, `02` few
//! clouds, `03`/`04` clouds, `09`/`10` rain, `11` thunderstorm, `13` snow,
//! `50` mist) followed by `d` (day) or `n` (night).

use std::fmt;

/// One RGBA color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.0, self.1, self.2, self.3)
    }
}

pub const DAY_STOP: Rgba = Rgba(240, 240, 240, 0.5);
pub const NIGHT_STOP: Rgba = Rgba(2, 0, 36, 0.5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub icon: &'static str,
    pub time_stop: Rgba,
    pub condition_stop: Rgba,
}

impl Appearance {
    const fn day(icon: &'static str, condition_stop: Rgba) -> Self {
        Self { icon, time_stop: DAY_STOP, condition_stop }
    }

    const fn night(icon: &'static str, condition_stop: Rgba) -> Self {
        Self { icon, time_stop: NIGHT_STOP, condition_stop }
    }

    /// 45° two-stop gradient: time of day at 0%, condition at 60%.
    pub fn gradient(&self) -> String {
        format!(
            "linear-gradient(45deg, {} 0%, {} 60%)",
            self.time_stop, self.condition_stop
        )
    }
}

pub const UNKNOWN_ICON: &str = "help-circle-outline";
const UNKNOWN_STOP: Rgba = Rgba(196, 196, 196, 0.6);

const CLOUDS_DAY: Rgba = Rgba(196, 196, 196, 0.6);
const CLOUDS_NIGHT: Rgba = Rgba(70, 70, 180, 0.6);
const RAIN: Rgba = Rgba(0, 67, 227, 0.6);
const STORM: Rgba = Rgba(98, 0, 170, 0.6);
const SNOW: Rgba = Rgba(0, 219, 247, 0.6);
const MIST: Rgba = Rgba(168, 160, 122, 0.6);

pub static APPEARANCES: [(&str, Appearance); 18] = [
    ("01d", Appearance::day("sunny-outline", Rgba(255, 246, 0, 0.65))),
    ("01n", Appearance::night("moon-outline", Rgba(130, 130, 255, 0.6))),
    ("02d", Appearance::day("partly-sunny-outline", Rgba(211, 213, 119, 0.6))),
    ("02n", Appearance::night("cloudy-night-outline", Rgba(100, 100, 195, 0.6))),
    ("03d", Appearance::day("cloud-outline", CLOUDS_DAY)),
    ("03n", Appearance::night("cloud-outline", CLOUDS_NIGHT)),
    ("04d", Appearance::day("cloud-outline", CLOUDS_DAY)),
    ("04n", Appearance::night("cloud-outline", CLOUDS_NIGHT)),
    ("09d", Appearance::day("rainy-outline", RAIN)),
    ("09n", Appearance::night("rainy-outline", RAIN)),
    ("10d", Appearance::day("rainy-outline", RAIN)),
    ("10n", Appearance::night("rainy-outline", RAIN)),
    ("11d", Appearance::day("thunderstorm-outline", STORM)),
    ("11n", Appearance::night("thunderstorm-outline", STORM)),
    ("13d", Appearance::day("snow-outline", SNOW)),
    ("13n", Appearance::night("snow-outline", SNOW)),
    ("50d", Appearance::day("reorder-four-outline", MIST)),
    ("50n", Appearance::night("reorder-four-outline", MIST)),
];

/// Look up the appearance for a condition code.
///
/// Unrecognized codes get a neutral fallback; an `n` suffix still selects the
/// night time stop.
pub fn appearance_for(code: &str) -> Appearance {
    APPEARANCES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, appearance)| *appearance)
        .unwrap_or_else(|| {
            if code.ends_with('n') {
                Appearance::night(UNKNOWN_ICON, UNKNOWN_STOP)
            } else {
                Appearance::day(UNKNOWN_ICON, UNKNOWN_STOP)
            }
        })
}
