//! Core library for the `weathercard` viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The HTTP client for the current-weather endpoint
//! - City validation and position lookup
//! - Normalization of provider payloads into a render-ready card
//! - The presenter that owns the displayed state
//!
//! It is used by `weathercard-cli`, but can also be reused by other front ends.

pub mod appearance;
pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod normalize;
pub mod presenter;
pub mod validate;

pub use appearance::{Appearance, appearance_for};
pub use client::{OpenWeatherClient, WeatherClient};
pub use config::{ApiConfig, Config};
pub use error::WeatherError;
pub use location::{FixedLocation, Geolocator, IpGeolocator};
pub use model::{Coordinates, DisplayModel, WeatherQuery, WeatherResponse};
pub use normalize::normalize;
pub use presenter::{DisplayState, Notification, Notifier, Presenter, Startup};
pub use validate::{CityError, CityQuery};
