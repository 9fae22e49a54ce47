use crate::{
    Config, WeatherError,
    model::{Coordinates, CurrentConditions, ForecastOutcome, IconSize},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions and daily forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve `city` and return its current conditions, including the
    /// coordinates needed for [`WeatherProvider::forecast`].
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Up to seven upcoming days, starting tomorrow. Never fails: problems
    /// are reported as [`ForecastOutcome::Unavailable`].
    async fn forecast(&self, coordinates: &Coordinates) -> ForecastOutcome;

    /// URL of the condition glyph for `icon`. The image itself is never fetched here.
    fn icon_url(&self, icon: &str, size: IconSize) -> String;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Box::new(provider))
}
