use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::model::WeatherResponse;

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Forecast window requested from the API.
pub const FORECAST_DAYS: u8 = 7;

/// WeatherAPI.com `forecast.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResponse, FetchError> {
        let days = FORECAST_DAYS.to_string();

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days.as_str()),
                ("aqi", "yes"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "forecast request rejected");
            return Err(FetchError::Http { status: status.as_u16() });
        }

        let parsed: WeatherResponse = serde_json::from_str(&body)?;
        debug!(
            location = %parsed.location.name,
            days = parsed.forecast.forecastday.len(),
            "forecast received"
        );

        Ok(parsed)
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
