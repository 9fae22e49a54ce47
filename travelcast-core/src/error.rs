use thiserror::Error;

/// Failures of the current-conditions lookup.
///
/// Any of these aborts the whole query: no forecast is requested once the
/// first step has failed. The `Display` text is meant to be shown to the user
/// verbatim.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The service does not know the queried city.
    #[error("City '{city}' not found. Please enter a valid name.")]
    NotFound { city: String },

    /// DNS, connect, timeout or non-2xx status.
    #[error("Network or API Key Error. Check your connection or API key: {0}")]
    Transport(String),

    /// Anything else, typically a payload that does not have the expected shape.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl WeatherError {
    pub fn not_found(city: impl Into<String>) -> Self {
        Self::NotFound { city: city.into() }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(format!("malformed response: {err}"))
    }
}
