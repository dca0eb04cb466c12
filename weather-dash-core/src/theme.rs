use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

use crate::{
    chart::{AxisColors, ChartHandle},
    ports::{OutputPort, Slot, SlotValue},
};

/// Page color scheme. Lives for the session; dark by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn axis_colors(&self) -> AxisColors {
        match self {
            Theme::Light => AxisColors { text: "#666", grid: "#e0e0e0" },
            Theme::Dark => AxisColors { text: "#b0b0b0", grid: "#3a3a3a" },
        }
    }

    /// Icon class and color of the theme switch.
    pub fn indicator(&self) -> (&'static str, &'static str) {
        match self {
            Theme::Light => ("far fa-moon", "#000000ff"),
            Theme::Dark => ("fas fa-sun", "#ffffffff"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

pub fn render_theme_indicator(theme: Theme, port: &mut dyn OutputPort) {
    let (class, color) = theme.indicator();
    port.write(
        Slot::ThemeIcon,
        SlotValue::Icon { class: class.to_string(), color: Some(color.to_string()) },
    );
}

/// Flip the theme, update the switch icon and recolor a live chart in place.
/// Other sections pick the new theme up on their next render.
pub fn toggle_theme(theme: &mut Theme, port: &mut dyn OutputPort, chart: &mut ChartHandle) {
    *theme = theme.toggled();
    render_theme_indicator(*theme, port);

    let restyled = chart.restyle(theme.axis_colors());
    debug!(theme = %theme, restyled, "theme toggled");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::fake::FakeFactory;
    use crate::ports::RecordingPort;

    #[test]
    fn defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert!(err.to_string().contains("Unknown theme"));
    }

    #[test]
    fn color_pairs_differ_per_mode() {
        let light = Theme::Light.axis_colors();
        let dark = Theme::Dark.axis_colors();
        assert_eq!(light.text, "#666");
        assert_eq!(dark.text, "#b0b0b0");
        assert_ne!(light.grid, dark.grid);
    }

    #[test]
    fn toggle_without_chart_only_updates_indicator() {
        let (factory, ledger) = FakeFactory::new();
        let mut chart = ChartHandle::new(Box::new(factory));
        let mut port = RecordingPort::new();
        let mut theme = Theme::Dark;

        toggle_theme(&mut theme, &mut port, &mut chart);

        assert_eq!(theme, Theme::Light);
        assert!(!chart.is_live());
        assert_eq!(ledger.borrow().created, 0);
        assert_eq!(
            port.latest(Slot::ThemeIcon),
            Some(&SlotValue::Icon {
                class: "far fa-moon".into(),
                color: Some("#000000ff".into())
            })
        );
        assert_eq!(port.writes().len(), 1);
    }

    #[test]
    fn toggle_recolors_live_chart_without_recreating() {
        let (factory, ledger) = FakeFactory::new();
        let mut chart = ChartHandle::new(Box::new(factory));
        chart.replace(&crate::chart::ChartSpec {
            labels: vec!["Mon".into()],
            values: vec![3],
            series: Default::default(),
            axes: Theme::Dark.axis_colors(),
        });
        let mut port = RecordingPort::new();
        let mut theme = Theme::Dark;

        toggle_theme(&mut theme, &mut port, &mut chart);
        toggle_theme(&mut theme, &mut port, &mut chart);

        let ledger = ledger.borrow();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(ledger.created, 1);
        assert_eq!(ledger.redraws, 2);
        assert_eq!(ledger.colors, Some(Theme::Dark.axis_colors()));
    }
}
