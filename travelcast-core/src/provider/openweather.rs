use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
    Config, WeatherError,
    config::Endpoints,
    model::{Coordinates, CurrentConditions, ForecastDay, ForecastOutcome, IconSize},
};

use super::WeatherProvider;

/// Days returned after dropping "today" from the 8-day daily forecast.
pub const FORECAST_DAYS: usize = 7;

const FORECAST_EXCLUDE: &str = "current,minutely,hourly,alerts";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    endpoints: Endpoints,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_owned(),
            http,
            endpoints: config.endpoints.clone(),
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = self.endpoints.current_url();
        tracing::debug!(url, city, "requesting current conditions");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::not_found(city));
        }

        if !status.is_success() {
            return Err(WeatherError::Transport(format!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        parse_current(city, &body)
    }

    async fn fetch_forecast(&self, coordinates: &Coordinates) -> Result<ForecastOutcome> {
        let url = self.endpoints.forecast_url();
        let lat = coordinates.lat().to_string();
        let lon = coordinates.lon().to_string();
        tracing::debug!(url, lat = coordinates.lat(), lon = coordinates.lon(), "requesting daily forecast");

        let res = self
            .http
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("exclude", FORECAST_EXCLUDE),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to OpenWeather (daily forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwDaily {
    dt: i64,
    temp: OwDailyTemp,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    #[serde(default)]
    timezone_offset: Option<i32>,
    // Only the days actually shown are decoded; "today" may be malformed.
    daily: Vec<Value>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(city).await
    }

    async fn forecast(&self, coordinates: &Coordinates) -> ForecastOutcome {
        match self.fetch_forecast(coordinates).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(%reason, "daily forecast unavailable");
                ForecastOutcome::unavailable(reason)
            }
        }
    }

    fn icon_url(&self, icon: &str, size: IconSize) -> String {
        format!("{}{}{}", self.endpoints.icon_base_url(), icon, size.suffix())
    }
}

fn parse_current(city: &str, body: &str) -> Result<CurrentConditions, WeatherError> {
    let value: Value = serde_json::from_str(body)?;

    if reports_not_found(&value) {
        return Err(WeatherError::not_found(city));
    }

    let parsed: OwCurrentResponse = serde_json::from_value(value)?;

    let weather = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Unexpected("response contained no weather entry".into()))?;

    Ok(CurrentConditions {
        city: parsed.name,
        coordinates: Coordinates::new(parsed.coord.lat, parsed.coord.lon)?,
        temperature_c: truncate_temp(parsed.main.temp),
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        description: capitalize(&weather.description),
        icon: weather.icon,
    })
}

fn parse_forecast(body: &str) -> Result<ForecastOutcome> {
    let parsed: OwOneCallResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather forecast JSON")?;

    let offset_secs = parsed.timezone_offset.unwrap_or(0);
    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| anyhow!("invalid timezone offset {offset_secs}"))?;

    // daily[0] is today
    let days = parsed
        .daily
        .into_iter()
        .enumerate()
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|(idx, raw)| {
            let entry: OwDaily = serde_json::from_value(raw)
                .with_context(|| format!("Failed to parse OpenWeather forecast JSON (daily[{idx}])"))?;
            forecast_day(entry, &offset)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ForecastOutcome::from_days(days))
}

fn forecast_day(entry: OwDaily, offset: &FixedOffset) -> Result<ForecastDay> {
    let day = DateTime::<Utc>::from_timestamp(entry.dt, 0)
        .ok_or_else(|| anyhow!("forecast timestamp {} out of range", entry.dt))?
        .with_timezone(offset)
        .format("%a")
        .to_string();

    let weather = entry
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("forecast day {} contained no weather entry", entry.dt))?;

    Ok(ForecastDay {
        day,
        temperature_c: truncate_temp(entry.temp.day),
        min_c: truncate_temp(entry.temp.min),
        max_c: truncate_temp(entry.temp.max),
        description: capitalize(&weather.description),
        icon: weather.icon,
    })
}

/// The service answers unknown cities with `"cod": "404"`, sometimes as a number.
fn reports_not_found(value: &Value) -> bool {
    match value.get("cod") {
        Some(Value::String(code)) => code == "404",
        Some(Value::Number(code)) => code.as_i64() == Some(404),
        _ => false,
    }
}

/// Drops the fractional part, so 23.9 becomes 23 and -1.7 becomes -1.
fn truncate_temp(temp: f64) -> i32 {
    temp.trunc() as i32
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
