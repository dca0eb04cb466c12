//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - The WeatherAPI.com client and its response model
//! - Icon resolution and unit formatting
//! - Section renderers writing into abstract output slots
//! - The chart lifecycle, theme switching and search orchestration
//! - Configuration & credentials handling
//!
//! It knows nothing about the surface the page is drawn on; front-ends
//! implement [`OutputPort`] and [`ChartFactory`].

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod icon;
pub mod model;
pub mod ports;
pub mod provider;
pub mod render;
pub mod theme;

pub use chart::{AxisColors, ChartFactory, ChartHandle, ChartInstance, ChartSpec};
pub use config::Config;
pub use dashboard::{Dashboard, DisplayState, SearchError};
pub use icon::{IconId, resolve_icon};
pub use model::{WeatherQuery, WeatherResponse};
pub use ports::{ForecastCard, OutputPort, RainRow, RecordingPort, Slot, SlotValue};
pub use provider::{FetchError, WeatherApiProvider, WeatherProvider, classify_error};
pub use theme::Theme;
