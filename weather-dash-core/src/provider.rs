use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::WeatherResponse;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

pub const GENERIC_FETCH_MESSAGE: &str = "Unable to fetch weather data";

/// Failure of a single forecast request. Nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather provider responded with status {status}")]
    Http { status: u16 },

    #[error("failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status for remote rejections; `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            FetchError::Transport(_) | FetchError::Decode(_) => None,
        }
    }

    pub fn user_message(&self) -> &'static str {
        classify_error(self.status())
    }
}

/// Map a status code onto the message shown to the user.
pub fn classify_error(status: Option<u16>) -> &'static str {
    match status {
        Some(401) => "Invalid API key",
        Some(400) => "City not found",
        _ => GENERIC_FETCH_MESSAGE,
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus the seven-day forecast for `city`.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResponse, FetchError>;

    /// Whether credentials are present; callers must not fetch otherwise.
    fn is_configured(&self) -> bool;
}
