//! Maps provider condition text onto Weather Icons glyph ids.

use std::fmt;

/// Identifier of a glyph in the Weather Icons font, e.g. `wi-rain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(&'static str);

impl IconId {
    pub const RAIN: IconId = IconId("wi-rain");
    pub const SNOW: IconId = IconId("wi-snow");
    pub const CLOUDY: IconId = IconId("wi-cloudy");
    pub const DAY_SUNNY: IconId = IconId("wi-day-sunny");
    pub const NIGHT_CLEAR: IconId = IconId("wi-night-clear");
    pub const DAY_CLOUDY: IconId = IconId("wi-day-cloudy");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Full class attribute for the glyph (`wi wi-rain`).
    pub fn css_class(&self) -> String {
        format!("wi {}", self.0)
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Exact WeatherAPI.com condition strings.
const CONDITION_TABLE: &[(&str, &str)] = &[
    ("Sunny", "wi-day-sunny"),
    ("Clear", "wi-night-clear"),
    ("Partly cloudy", "wi-day-cloudy"),
    ("Cloudy", "wi-cloudy"),
    ("Overcast", "wi-cloudy"),
    ("Mist", "wi-fog"),
    ("Patchy rain possible", "wi-day-rain"),
    ("Patchy snow possible", "wi-day-snow"),
    ("Patchy sleet possible", "wi-day-sleet"),
    ("Patchy freezing drizzle possible", "wi-day-sleet"),
    ("Thundery outbreaks possible", "wi-day-thunderstorm"),
    ("Blowing snow", "wi-snow-wind"),
    ("Blizzard", "wi-snow-wind"),
    ("Fog", "wi-fog"),
    ("Freezing fog", "wi-fog"),
    ("Patchy light drizzle", "wi-sprinkle"),
    ("Light drizzle", "wi-sprinkle"),
    ("Freezing drizzle", "wi-sleet"),
    ("Heavy freezing drizzle", "wi-sleet"),
    ("Patchy light rain", "wi-rain"),
    ("Light rain", "wi-rain"),
    ("Moderate rain at times", "wi-rain"),
    ("Moderate rain", "wi-rain"),
    ("Heavy rain at times", "wi-rain"),
    ("Heavy rain", "wi-rain"),
    ("Light freezing rain", "wi-rain-mix"),
    ("Moderate or heavy freezing rain", "wi-rain-mix"),
    ("Light sleet", "wi-sleet"),
    ("Moderate or heavy sleet", "wi-sleet"),
    ("Patchy light snow", "wi-snow"),
    ("Light snow", "wi-snow"),
    ("Patchy moderate snow", "wi-snow"),
    ("Moderate snow", "wi-snow"),
    ("Patchy heavy snow", "wi-snow"),
    ("Heavy snow", "wi-snow"),
    ("Ice pellets", "wi-hail"),
    ("Light rain shower", "wi-showers"),
    ("Moderate or heavy rain shower", "wi-showers"),
    ("Torrential rain shower", "wi-showers"),
    ("Light sleet showers", "wi-sleet"),
    ("Moderate or heavy sleet showers", "wi-sleet"),
    ("Light snow showers", "wi-snow"),
    ("Moderate or heavy snow showers", "wi-snow"),
    ("Light showers of ice pellets", "wi-hail"),
    ("Moderate or heavy showers of ice pellets", "wi-hail"),
    ("Patchy light rain with thunder", "wi-thunderstorm"),
    ("Moderate or heavy rain with thunder", "wi-thunderstorm"),
    ("Patchy light snow with thunder", "wi-thunderstorm"),
    ("Moderate or heavy snow with thunder", "wi-thunderstorm"),
];

enum Outcome {
    Fixed(IconId),
    DayNight { day: IconId, night: IconId },
}

type Rule = (fn(&str) -> bool, Outcome);

fn mentions_rain(s: &str) -> bool {
    s.contains("rain")
}

fn mentions_snow(s: &str) -> bool {
    s.contains("snow")
}

fn mentions_cloud(s: &str) -> bool {
    s.contains("cloud")
}

fn mentions_sun_or_clear(s: &str) -> bool {
    s.contains("sun") || s.contains("clear")
}

/// Keyword fallbacks, first match wins. Input is lowercased.
const KEYWORD_RULES: &[Rule] = &[
    (mentions_rain, Outcome::Fixed(IconId::RAIN)),
    (mentions_snow, Outcome::Fixed(IconId::SNOW)),
    (mentions_cloud, Outcome::Fixed(IconId::CLOUDY)),
    (
        mentions_sun_or_clear,
        Outcome::DayNight { day: IconId::DAY_SUNNY, night: IconId::NIGHT_CLEAR },
    ),
];

/// Resolve the glyph for a condition. Total: unknown text falls back to
/// [`IconId::DAY_CLOUDY`].
pub fn resolve_icon(condition: &str, is_daytime: bool) -> IconId {
    if let Some((_, icon)) = CONDITION_TABLE.iter().find(|(text, _)| *text == condition) {
        return IconId(icon);
    }

    let lower = condition.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, outcome)| match outcome {
            Outcome::Fixed(icon) => *icon,
            Outcome::DayNight { day, night } => {
                if is_daytime {
                    *day
                } else {
                    *night
                }
            }
        })
        .unwrap_or(IconId::DAY_CLOUDY)
}
