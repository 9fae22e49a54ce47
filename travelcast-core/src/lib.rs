//! Core library for the `travelcast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (current conditions + 7-day forecast)
//! - The two-step report pipeline and the packing advice heuristic
//!
//! It is used by `travelcast-cli`, but can also be reused by other front ends.

pub mod advice;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use advice::{Advice, advise};
pub use config::{Config, Endpoints};
pub use error::WeatherError;
pub use model::{
    Coordinates, CurrentConditions, ForecastDay, ForecastOutcome, IconSize, WeatherReport,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use report::fetch_report;
