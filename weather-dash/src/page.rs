//! Terminal rendition of the dashboard page.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use weather_dash_core::{ForecastCard, OutputPort, RainRow, Slot, SlotValue};

use crate::chart::{SharedCanvas, frame_text};

const RAIN_BAR_WIDTH: usize = 20;

/// Holds the latest value of every slot and prints them as a page.
#[derive(Debug)]
pub struct TerminalPage {
    slots: BTreeMap<Slot, SlotValue>,
    canvas: SharedCanvas,
    colored: bool,
}

impl TerminalPage {
    pub fn new(canvas: SharedCanvas) -> Self {
        Self { slots: BTreeMap::new(), canvas, colored: false }
    }

    /// Keep chart colors when printing; only useful on a real terminal.
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn visible(&self, slot: Slot) -> bool {
        matches!(
            self.slots.get(&slot),
            Some(SlotValue::Visible(true)) | Some(SlotValue::Banner { visible: true, .. })
        )
    }

    fn text(&self, slot: Slot) -> &str {
        match self.slots.get(&slot) {
            Some(SlotValue::Text(s)) => s,
            _ => "-",
        }
    }

    fn icon(&self, slot: Slot) -> &str {
        match self.slots.get(&slot) {
            Some(SlotValue::Icon { class, .. }) => class,
            _ => "",
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("weather-dash [{}]\n\n", self.icon(Slot::ThemeIcon));

        if self.visible(Slot::Loading) {
            out.push_str("Loading...\n");
        }

        if let Some(SlotValue::Banner { message, visible: true }) = self.slots.get(&Slot::Error) {
            out.push_str(&format!("Error: {message}\n"));
        }

        if self.visible(Slot::Content) {
            self.render_content(&mut out);
        }

        out
    }

    fn render_content(&self, out: &mut String) {
        out.push_str(&format!(
            "{}  ({})\n{}  {}\n{}\n\n",
            self.text(Slot::MainLocation),
            self.text(Slot::LastUpdated),
            self.text(Slot::MainTemp),
            self.text(Slot::MainCondition),
            self.icon(Slot::MainIcon),
        ));

        let details = [
            ("Humidity", self.text(Slot::Humidity)),
            ("Wind", self.text(Slot::WindSpeed)),
            ("Visibility", self.text(Slot::Visibility)),
            ("Pressure", self.text(Slot::Pressure)),
            ("UV index", self.text(Slot::UvIndex)),
            ("Precipitation", self.text(Slot::Precipitation)),
            ("Sunrise", self.text(Slot::Sunrise)),
            ("Sunset", self.text(Slot::Sunset)),
            ("Air quality", self.text(Slot::AirQuality)),
        ];
        for (label, value) in details {
            out.push_str(&format!("  {label:<14}{value}\n"));
        }

        if let Some(SlotValue::ForecastCards(cards)) = self.slots.get(&Slot::ForecastGrid) {
            out.push_str(&format!("\nForecast\n"));
            for card in cards {
                out.push_str(&forecast_line(card));
            }
        }

        if let Some(SlotValue::RainRows(rows)) = self.slots.get(&Slot::RainChance) {
            out.push_str(&format!("\nChance of rain\n"));
            for row in rows {
                out.push_str(&rain_line(row));
            }
        }

        if let Some(frame) = self.canvas.borrow().frame.as_ref() {
            out.push_str("\nTemperature trend\n");
            out.push_str(&frame_text(frame, self.colored));
        }
    }

    /// Every slot by its page id, plus the live chart spec.
    pub fn snapshot(&self) -> Value {
        let mut map: Map<String, Value> = self
            .slots
            .iter()
            .map(|(slot, value)| (slot.id().to_string(), json!(value)))
            .collect();

        if let Some(spec) = self.canvas.borrow().spec.as_ref() {
            map.insert(Slot::Chart.id().to_string(), json!(spec));
        }
        Value::Object(map)
    }
}

impl OutputPort for TerminalPage {
    fn write(&mut self, slot: Slot, value: SlotValue) {
        self.slots.insert(slot, value);
    }
}

fn forecast_line(card: &ForecastCard) -> String {
    format!(
        "  {:<4}{:>6}  {:<22} cloud {:>3}%  wind {:>9}  hum {:>3}%  rain {:>3}%\n",
        card.day_name,
        card.temperature,
        card.icon_class,
        card.cloud_pct,
        card.wind,
        card.humidity_pct,
        card.rain_chance_pct,
    )
}

fn rain_line(row: &RainRow) -> String {
    let filled = (usize::from(row.chance_pct.min(100)) * RAIN_BAR_WIDTH).div_ceil(100);
    format!(
        "  {:<4}[{}{}] {}\n",
        row.day_name,
        "#".repeat(filled),
        " ".repeat(RAIN_BAR_WIDTH - filled),
        row.fill_width(),
    )
}
