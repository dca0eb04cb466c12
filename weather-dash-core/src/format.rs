//! Display formatting for raw provider values.
//!
//! Every helper is total over its input. Rounding follows the browser
//! convention the dashboard was designed against: halves round up, so
//! `-2.5` becomes `-2`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::HourRecord;

const MB_PER_INCH_HG: f64 = 33.86;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Two decimal places, ties rounded up like the integer case (`0.125` gives
/// `0.13`).
pub fn fixed_2(value: f64) -> String {
    format!("{:.2}", round_half_up(value * 100.0) as f64 / 100.0)
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{} °C", round_half_up(celsius))
}

/// Compact form used on forecast cards (`12°C`).
pub fn format_temperature_compact(celsius: f64) -> String {
    format!("{}°C", round_half_up(celsius))
}

pub fn format_wind_speed(kph: f64) -> String {
    format!("{} km/h", round_half_up(kph))
}

pub fn format_visibility(km: f64) -> String {
    format!("{km} km")
}

/// Millibars to inches of mercury.
pub fn format_pressure(millibars: f64) -> String {
    format!("{} Hg", fixed_2(millibars / MB_PER_INCH_HG))
}

pub fn format_precipitation(mm: f64) -> String {
    format!("{} mm", fixed_2(mm))
}

/// EPA index scaled by 100; values above 999 are shown in thousands.
pub fn format_air_quality(epa_index: Option<f64>) -> String {
    let scaled = epa_index.map(|i| i * 100.0).filter(|v| v.is_finite()).unwrap_or(0.0);
    let aqi = round_half_up(scaled);

    if aqi > 999 {
        format!("{}K", fixed_2(aqi as f64 / 1000.0))
    } else {
        aqi.to_string()
    }
}

/// Short weekday name (`Mon`) for a `YYYY-MM-DD` date.
pub fn day_name(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%a").to_string(),
        Err(_) => date.to_string(),
    }
}

/// `Last Updated: Jan 15` from a `YYYY-MM-DD HH:MM` local time.
pub fn last_updated_label(localtime: &str) -> String {
    let date = NaiveDateTime::parse_from_str(localtime, "%Y-%m-%d %H:%M")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(localtime, "%Y-%m-%d"));

    match date {
        Ok(d) => format!("Last Updated: {}", d.format("%b %-d")),
        Err(_) => format!("Last Updated: {localtime}"),
    }
}

/// Mean cloud cover across hourly records; 0 when there are none.
pub fn average_cloud(hours: &[HourRecord]) -> i64 {
    if hours.is_empty() {
        return 0;
    }
    let total: f64 = hours.iter().map(|h| h.cloud).sum();
    round_half_up(total / hours.len() as f64)
}
