//! Section renderers. Each one projects a slice of the response onto its
//! output slots; every write is a full replacement, so re-rendering with
//! fresh data is always safe.

use crate::{
    chart::{ChartHandle, ChartSpec, SeriesStyle},
    format,
    icon::resolve_icon,
    model::{Current, ForecastDay, Location, WeatherResponse},
    ports::{ForecastCard, OutputPort, RainRow, Slot, SlotValue},
    theme::Theme,
};

fn set_text(port: &mut dyn OutputPort, slot: Slot, text: impl Into<String>) {
    port.write(slot, SlotValue::text(text));
}

pub fn render_current(current: &Current, location: &Location, port: &mut dyn OutputPort) {
    set_text(port, Slot::MainLocation, format!("{}, {}", location.name, location.country));
    set_text(port, Slot::MainTemp, format::format_temperature(current.temp_c));
    set_text(port, Slot::MainCondition, current.condition.text.clone());
    set_text(port, Slot::LastUpdated, format::last_updated_label(&location.localtime));

    let icon = resolve_icon(&current.condition.text, current.is_daytime());
    port.write(Slot::MainIcon, SlotValue::Icon { class: icon.css_class(), color: None });
}

pub fn render_details(current: &Current, port: &mut dyn OutputPort) {
    set_text(port, Slot::Humidity, current.humidity.to_string());
    set_text(port, Slot::WindSpeed, format::format_wind_speed(current.wind_kph));
    set_text(port, Slot::Visibility, format::format_visibility(current.vis_km));
    set_text(port, Slot::Pressure, format::format_pressure(current.pressure_mb));
    set_text(port, Slot::UvIndex, current.uv.to_string());
    set_text(port, Slot::Precipitation, format::format_precipitation(current.precip_mm));
}

/// Sunrise and sunset come from today's forecast; air quality from current
/// conditions.
pub fn render_astro_and_air_quality(
    today: Option<&ForecastDay>,
    current: &Current,
    port: &mut dyn OutputPort,
) {
    if let Some(today) = today {
        set_text(port, Slot::Sunrise, today.astro.sunrise.clone());
        set_text(port, Slot::Sunset, today.astro.sunset.clone());
    }
    set_text(port, Slot::AirQuality, format::format_air_quality(current.epa_index()));
}

pub fn forecast_card(day: &ForecastDay) -> ForecastCard {
    ForecastCard {
        day_name: format::day_name(&day.date),
        icon_class: resolve_icon(&day.day.condition.text, true).css_class(),
        temperature: format::format_temperature_compact(day.day.avgtemp_c),
        cloud_pct: format::average_cloud(&day.hour),
        wind: format::format_wind_speed(day.day.maxwind_kph),
        humidity_pct: day.day.avghumidity,
        rain_chance_pct: day.day.daily_chance_of_rain,
    }
}

pub fn render_forecast(days: &[ForecastDay], port: &mut dyn OutputPort) {
    let cards = days.iter().map(forecast_card).collect();
    port.write(Slot::ForecastGrid, SlotValue::ForecastCards(cards));
}

pub fn render_rain_chances(days: &[ForecastDay], port: &mut dyn OutputPort) {
    let rows = days
        .iter()
        .map(|d| RainRow {
            day_name: format::day_name(&d.date),
            chance_pct: d.day.daily_chance_of_rain,
        })
        .collect();
    port.write(Slot::RainChance, SlotValue::RainRows(rows));
}

pub fn chart_spec(days: &[ForecastDay], theme: Theme) -> ChartSpec {
    ChartSpec {
        labels: days.iter().map(|d| format::day_name(&d.date)).collect(),
        values: days.iter().map(|d| format::round_half_up(d.day.avgtemp_c)).collect(),
        series: SeriesStyle::default(),
        axes: theme.axis_colors(),
    }
}

pub fn render_chart(days: &[ForecastDay], theme: Theme, chart: &mut ChartHandle) {
    chart.replace(&chart_spec(days, theme));
}

/// Every section, in page order.
pub fn render_all(
    data: &WeatherResponse,
    theme: Theme,
    port: &mut dyn OutputPort,
    chart: &mut ChartHandle,
) {
    render_current(&data.current, &data.location, port);
    render_details(&data.current, port);
    render_astro_and_air_quality(data.today(), &data.current, port);
    render_forecast(data.days(), port);
    render_rain_chances(data.days(), port);
    render_chart(data.days(), theme, chart);
}
