use serde::{Deserialize, Serialize};

/// A city search as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    /// Trim the raw input; `None` when nothing is left.
    pub fn parse(input: &str) -> Option<Self> {
        let city = input.trim();
        if city.is_empty() {
            None
        } else {
            Some(Self { city: city.to_string() })
        }
    }
}

/// Payload of the WeatherAPI.com `forecast.json` endpoint, reduced to the
/// fields the dashboard shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

impl WeatherResponse {
    /// First forecast day; the API returns days in ascending order.
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Local time at the location, `YYYY-MM-DD HH:MM`.
    pub localtime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    /// 1 during daylight, 0 at night.
    pub is_day: u8,
    pub humidity: u8,
    pub wind_kph: f64,
    pub vis_km: f64,
    pub pressure_mb: f64,
    pub uv: f64,
    pub precip_mm: f64,
    pub condition: Condition,
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
}

impl Current {
    pub fn is_daytime(&self) -> bool {
        self.is_day != 0
    }

    pub fn epa_index(&self) -> Option<f64> {
        self.air_quality.as_ref().and_then(|aq| aq.us_epa_index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "us-epa-index", default)]
    pub us_epa_index: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub astro: Astro,
    pub day: DaySummary,
    #[serde(default)]
    pub hour: Vec<HourRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
    pub avghumidity: f64,
    pub daily_chance_of_rain: u8,
    pub condition: Condition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourRecord {
    pub cloud: f64,
}
