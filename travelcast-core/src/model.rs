use serde::Serialize;

use crate::{WeatherError, advice::Advice};

/// A validated point on the globe, in degrees.
///
/// The forecast step only accepts this type, and the only way to get one
/// inside a query is from a successful [`CurrentConditions`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, WeatherError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(WeatherError::Unexpected(format!("latitude {lat} out of range")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherError::Unexpected(format!("longitude {lon} out of range")));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// City name as echoed by the service, which may differ from the query.
    pub city: String,
    pub coordinates: Coordinates,
    /// Degrees Celsius, truncated toward zero.
    pub temperature_c: i32,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Three-letter weekday, e.g. "Mon".
    pub day: String,
    pub temperature_c: i32,
    pub min_c: i32,
    pub max_c: i32,
    pub description: String,
    pub icon: String,
}

impl ForecastDay {
    pub fn min_max_label(&self) -> String {
        format!("{}°C / {}°C", self.min_c, self.max_c)
    }
}

/// Result of the forecast step.
///
/// Callers that don't care why there is no forecast use [`ForecastOutcome::days`],
/// which treats `Empty` and `Unavailable` the same.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Days { days: Vec<ForecastDay> },
    Empty,
    Unavailable { reason: String },
}

impl ForecastOutcome {
    pub fn from_days(days: Vec<ForecastDay>) -> Self {
        if days.is_empty() { Self::Empty } else { Self::Days { days } }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub fn days(&self) -> &[ForecastDay] {
        match self {
            Self::Days { days } => days,
            Self::Empty | Self::Unavailable { .. } => &[],
        }
    }

    pub fn into_days(self) -> Vec<ForecastDay> {
        match self {
            Self::Days { days } => days,
            Self::Empty | Self::Unavailable { .. } => Vec::new(),
        }
    }
}

/// Everything produced by one query.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub advice: Advice,
    pub forecast: ForecastOutcome,
}

/// Icon variants served by the icon endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Double resolution, used for current conditions.
    Large,
    /// Used for forecast rows.
    Small,
}

impl IconSize {
    pub fn suffix(&self) -> &'static str {
        match self {
            IconSize::Large => "@2x.png",
            IconSize::Small => ".png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(label: &str) -> ForecastDay {
        ForecastDay {
            day: label.to_string(),
            temperature_c: 12,
            min_c: -3,
            max_c: 14,
            description: "Light rain".to_string(),
            icon: "10d".to_string(),
        }
    }

    #[test]
    fn coordinates_reject_out_of_range_values() {
        assert!(Coordinates::new(51.5, -0.12).is_ok());
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn min_max_label_format() {
        assert_eq!(day("Tue").min_max_label(), "-3°C / 14°C");
    }

    #[test]
    fn empty_and_unavailable_both_yield_no_days() {
        assert_eq!(ForecastOutcome::from_days(Vec::new()), ForecastOutcome::Empty);
        assert!(ForecastOutcome::Empty.into_days().is_empty());

        let outcome = ForecastOutcome::unavailable("status 500");
        assert!(matches!(outcome, ForecastOutcome::Unavailable { .. }));
        assert!(outcome.days().is_empty());
    }

    #[test]
    fn days_are_kept_in_order() {
        let outcome = ForecastOutcome::from_days(vec![day("Mon"), day("Tue")]);
        let labels: Vec<_> = outcome.days().iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, ["Mon", "Tue"]);
    }

    #[test]
    fn icon_suffixes() {
        assert_eq!(IconSize::Large.suffix(), "@2x.png");
        assert_eq!(IconSize::Small.suffix(), ".png");
    }
}
