//! The two-step query: current conditions first, then the forecast for the
//! coordinates they carry.

use crate::{
    WeatherError,
    advice::advise,
    model::WeatherReport,
    provider::WeatherProvider,
};

/// Run one full query for `city`.
///
/// A failed current-conditions lookup is returned as-is and the forecast is
/// never requested. Forecast problems don't fail the query; they show up in
/// [`WeatherReport::forecast`].
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherReport, WeatherError> {
    let current = provider.current_conditions(city).await?;
    let forecast = provider.forecast(&current.coordinates).await;
    let advice = advise(&current.description, current.temperature_c);

    tracing::info!(
        city = %current.city,
        forecast_days = forecast.days().len(),
        "weather report ready"
    );

    Ok(WeatherReport { current, advice, forecast })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        advice::Advice,
        model::{Coordinates, CurrentConditions, ForecastDay, ForecastOutcome, IconSize},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CountingProvider {
        current: fn(&str) -> Result<CurrentConditions, WeatherError>,
        forecast: ForecastOutcome,
        current_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(
            current: fn(&str) -> Result<CurrentConditions, WeatherError>,
            forecast: ForecastOutcome,
        ) -> Self {
            Self {
                current,
                forecast,
                current_calls: AtomicUsize::new(0),
                forecast_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            (self.current)(city)
        }

        async fn forecast(&self, coordinates: &Coordinates) -> ForecastOutcome {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(coordinates.lat(), 48.85);
            self.forecast.clone()
        }

        fn icon_url(&self, icon: &str, _size: IconSize) -> String {
            icon.to_string()
        }
    }

    fn paris(_city: &str) -> Result<CurrentConditions, WeatherError> {
        Ok(CurrentConditions {
            city: "Paris".into(),
            coordinates: Coordinates::new(48.85, 2.35)?,
            temperature_c: 14,
            humidity_pct: 70,
            pressure_hpa: 1018,
            description: "Broken clouds".into(),
            icon: "04d".into(),
        })
    }

    fn missing(city: &str) -> Result<CurrentConditions, WeatherError> {
        Err(WeatherError::not_found(city))
    }

    fn offline(_city: &str) -> Result<CurrentConditions, WeatherError> {
        Err(WeatherError::Transport("connection refused".into()))
    }

    fn day(label: &str) -> ForecastDay {
        ForecastDay {
            day: label.into(),
            temperature_c: 15,
            min_c: 9,
            max_c: 17,
            description: "Clear sky".into(),
            icon: "01d".into(),
        }
    }

    #[tokio::test]
    async fn not_found_skips_forecast() {
        let provider = CountingProvider::new(missing, ForecastOutcome::Empty);

        let err = fetch_report(&provider, "Atlantis").await.unwrap_err();

        assert!(err.to_string().contains("Atlantis"));
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_error_skips_forecast() {
        let provider = CountingProvider::new(offline, ForecastOutcome::Empty);

        let err = fetch_report(&provider, "Paris").await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_runs_both_steps_and_advises() {
        let forecast = ForecastOutcome::from_days(vec![day("Tue"), day("Wed")]);
        let provider = CountingProvider::new(paris, forecast.clone());

        let report = fetch_report(&provider, "paris").await.expect("report");

        assert_eq!(report.current.city, "Paris");
        assert_eq!(report.advice, Advice::Cloudy);
        assert_eq!(report.forecast, forecast);
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unavailable_forecast_still_yields_report() {
        let provider = CountingProvider::new(paris, ForecastOutcome::unavailable("status 503"));

        let report = fetch_report(&provider, "Paris").await.expect("report");

        assert!(matches!(report.forecast, ForecastOutcome::Unavailable { .. }));
        assert!(report.forecast.days().is_empty());
    }
}
