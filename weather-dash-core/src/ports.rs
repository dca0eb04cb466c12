//! Output slots the dashboard writes into, and the port abstraction over
//! whatever surface actually shows them.

use serde::Serialize;
use std::collections::BTreeMap;

/// Addressable region of the page. Ids are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Loading,
    Error,
    Content,
    MainLocation,
    MainTemp,
    MainCondition,
    MainIcon,
    LastUpdated,
    Humidity,
    WindSpeed,
    Visibility,
    Pressure,
    UvIndex,
    Precipitation,
    Sunrise,
    Sunset,
    AirQuality,
    ForecastGrid,
    RainChance,
    Chart,
    ThemeIcon,
}

impl Slot {
    pub fn id(&self) -> &'static str {
        match self {
            Slot::Loading => "loading",
            Slot::Error => "error",
            Slot::Content => "weatherData",
            Slot::MainLocation => "mainLocation",
            Slot::MainTemp => "mainTemp",
            Slot::MainCondition => "mainCondition",
            Slot::MainIcon => "mainWeatherIcon",
            Slot::LastUpdated => "lastUpdated",
            Slot::Humidity => "humidity",
            Slot::WindSpeed => "windSpeed",
            Slot::Visibility => "visibility",
            Slot::Pressure => "pressure",
            Slot::UvIndex => "uvIndex",
            Slot::Precipitation => "precipitation",
            Slot::Sunrise => "sunrise",
            Slot::Sunset => "sunset",
            Slot::AirQuality => "aqiValue",
            Slot::ForecastGrid => "forecastGrid",
            Slot::RainChance => "rainChance",
            Slot::Chart => "weatherChart",
            Slot::ThemeIcon => "themeIcon",
        }
    }
}

/// One day on the forecast grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub day_name: String,
    pub icon_class: String,
    pub temperature: String,
    pub cloud_pct: i64,
    pub wind: String,
    pub humidity_pct: f64,
    pub rain_chance_pct: u8,
}

/// One row of the rain-chance list; the bar fill equals the percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainRow {
    pub day_name: String,
    pub chance_pct: u8,
}

impl RainRow {
    pub fn fill_width(&self) -> String {
        format!("{}%", self.chance_pct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SlotValue {
    Text(String),
    Visible(bool),
    Icon { class: String, color: Option<String> },
    /// Banner message plus visibility.
    Banner { message: String, visible: bool },
    ForecastCards(Vec<ForecastCard>),
    RainRows(Vec<RainRow>),
}

impl SlotValue {
    pub fn text(value: impl Into<String>) -> Self {
        SlotValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Sink for slot writes. Every write fully replaces the slot's content.
pub trait OutputPort {
    fn write(&mut self, slot: Slot, value: SlotValue);
}

/// Port that keeps every write, for tests and snapshots.
#[derive(Debug, Default, Clone)]
pub struct RecordingPort {
    writes: Vec<(Slot, SlotValue)>,
    latest: BTreeMap<Slot, SlotValue>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(Slot, SlotValue)] {
        &self.writes
    }

    pub fn latest(&self, slot: Slot) -> Option<&SlotValue> {
        self.latest.get(&slot)
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.latest(slot).and_then(SlotValue::as_text)
    }

    pub fn is_visible(&self, slot: Slot) -> bool {
        matches!(
            self.latest(slot),
            Some(SlotValue::Visible(true)) | Some(SlotValue::Banner { visible: true, .. })
        )
    }

    /// Order in which slots were first written.
    pub fn slot_order(&self) -> Vec<Slot> {
        let mut seen = Vec::new();
        for (slot, _) in &self.writes {
            if !seen.contains(slot) {
                seen.push(*slot);
            }
        }
        seen
    }
}

impl OutputPort for RecordingPort {
    fn write(&mut self, slot: Slot, value: SlotValue) {
        self.latest.insert(slot, value.clone());
        self.writes.push((slot, value));
    }
}
