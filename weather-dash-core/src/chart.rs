//! Temperature trend chart lifecycle.
//!
//! The drawing backend is opaque: it builds [`ChartInstance`]s from a
//! [`ChartSpec`] and tears them down when they are dropped. [`ChartHandle`]
//! owns at most one live instance at a time.

use serde::Serialize;
use std::fmt;

pub const ACCENT_COLOR: &str = "#ff7b54";

/// Tick and gridline colors for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisColors {
    pub text: &'static str,
    pub grid: &'static str,
}

/// Fixed styling of the temperature line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub tension: f64,
    pub fill: bool,
    pub point_background_color: &'static str,
    pub point_border_color: &'static str,
    pub point_border_width: u8,
    pub point_radius: u8,
    pub point_hover_radius: u8,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            border_color: ACCENT_COLOR,
            background_color: "rgba(255, 123, 84, 0.1)",
            tension: 0.4,
            fill: true,
            point_background_color: ACCENT_COLOR,
            point_border_color: "#fff",
            point_border_width: 2,
            point_radius: 5,
            point_hover_radius: 7,
        }
    }
}

/// A line chart: one label and one value per forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub series: SeriesStyle,
    pub axes: AxisColors,
}

/// A chart drawn by some backend. Dropping it releases the backend's
/// rendering context.
pub trait ChartInstance {
    /// Update tick colors on both axes and the y gridlines, in place.
    fn set_axis_colors(&mut self, colors: AxisColors);

    fn redraw(&mut self);
}

pub trait ChartFactory {
    fn create(&mut self, spec: &ChartSpec) -> Box<dyn ChartInstance>;
}

pub struct ChartHandle {
    factory: Box<dyn ChartFactory>,
    live: Option<Box<dyn ChartInstance>>,
}

impl ChartHandle {
    pub fn new(factory: Box<dyn ChartFactory>) -> Self {
        Self { factory, live: None }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Destroy the current chart, if any, then build one from `spec`.
    pub fn replace(&mut self, spec: &ChartSpec) {
        // Old instance must be gone before the backend builds the new one.
        self.live = None;
        self.live = Some(self.factory.create(spec));
    }

    /// Recolor the live chart and redraw it. Returns `false` when there is
    /// no chart yet.
    pub fn restyle(&mut self, colors: AxisColors) -> bool {
        match self.live.as_mut() {
            Some(chart) => {
                chart.set_axis_colors(colors);
                chart.redraw();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandle").field("live", &self.is_live()).finish()
    }
}
