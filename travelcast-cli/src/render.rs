use std::fmt::{self, Write};

use travelcast_core::{IconSize, WeatherProvider, WeatherReport};

const NO_FORECAST: &str = "Could not retrieve 7-Day Forecast.";

/// Plain-text rendering of a report: current conditions, advice, then the forecast table.
pub fn report(report: &WeatherReport, provider: &dyn WeatherProvider) -> Result<String, fmt::Error> {
    let current = &report.current;
    let mut out = String::new();

    writeln!(out, "Location: {}", current.city)?;
    writeln!(out, "Temperature: {}°C", current.temperature_c)?;
    writeln!(out, "Humidity: {}%", current.humidity_pct)?;
    writeln!(out, "Pressure: {} hPa", current.pressure_hpa)?;
    writeln!(out, "Description: {}", current.description)?;
    writeln!(out, "Icon: {}", provider.icon_url(&current.icon, IconSize::Large))?;
    writeln!(out)?;
    writeln!(out, "{}", report.advice)?;
    writeln!(out)?;
    writeln!(out, "7-Day Forecast (Next 7 Days)")?;

    let days = report.forecast.days();
    if days.is_empty() {
        writeln!(out, "{NO_FORECAST}")?;
        return Ok(out);
    }

    writeln!(
        out,
        "{:<5} {:>6} {:<17} {:<24} Icon",
        "Day", "Temp", "Min/Max", "Description"
    )?;
    for day in days {
        writeln!(
            out,
            "{:<5} {:>6} {:<17} {:<24} {}",
            day.day,
            format!("{}°C", day.temperature_c),
            day.min_max_label(),
            day.description,
            provider.icon_url(&day.icon, IconSize::Small),
        )?;
    }

    Ok(out)
}
