use std::{io::IsTerminal, rc::Rc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use tracing::{debug, info};
use weather_dash_core::{ChartHandle, Config, Dashboard, SearchError, Theme};

use crate::{
    chart::{SharedCanvas, TerminalChartFactory},
    page::TerminalPage,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// WeatherAPI.com key; overrides the configured one.
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default city and theme.
    Configure,

    /// Fetch once and print the dashboard.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// `light` or `dark`; defaults to the configured theme.
        #[arg(long)]
        theme: Option<Theme>,

        /// Print the page slots as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Keep the dashboard open: type a city to search, `:theme` to switch
    /// themes, `:quit` to leave.
    Interactive {
        #[arg(long)]
        theme: Option<Theme>,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, theme, json } => {
                let theme = theme.unwrap_or(config.theme);
                show(&config, city, theme, json).await
            }
            Command::Interactive { theme } => {
                let theme = theme.unwrap_or(config.theme);
                interactive(&config, theme).await
            }
        }
    }
}

fn build_dashboard(config: &Config, theme: Theme) -> Dashboard<TerminalPage> {
    let canvas = SharedCanvas::default();
    let chart = ChartHandle::new(Box::new(TerminalChartFactory::new(Rc::clone(&canvas))));
    let page = TerminalPage::new(canvas).with_color(std::io::stdout().is_terminal());
    let mut dashboard = Dashboard::new(Box::new(config.provider()), page, chart, theme);
    dashboard.set_city_input(config.default_city.clone());
    dashboard
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherapi.com/")
        .prompt()?;
    config.set_api_key(key.trim());

    let city = Text::new("Default city:").with_default(&config.default_city).prompt()?;
    config.default_city = city.trim().to_string();

    let themes = vec![Theme::Dark, Theme::Light];
    let start = themes.iter().position(|t| *t == config.theme).unwrap_or(0);
    config.theme = Select::new("Theme:", themes).with_starting_cursor(start).prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(config: &Config, city: Option<String>, theme: Theme, json: bool) -> anyhow::Result<()> {
    let mut dashboard = build_dashboard(config, theme);

    let outcome = match city {
        Some(city) => dashboard.change_city(&city).await,
        None => dashboard.startup().await,
    };

    if json {
        let snapshot = dashboard.port().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot).context("Failed to encode page")?);
    } else {
        print!("{}", dashboard.port().render());
    }

    outcome.map_err(|err| hint(&err))
}

async fn interactive(config: &Config, theme: Theme) -> anyhow::Result<()> {
    let mut dashboard = build_dashboard(config, theme);

    if let Err(err) = dashboard.startup().await {
        debug!(error = %err, "startup search failed");
    }
    print!("{}", dashboard.port().render());

    loop {
        let input = match Text::new("City:")
            .with_help_message(":theme switches light/dark, :quit exits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":theme" => {
                dashboard.toggle_theme();
                info!(theme = %dashboard.theme(), "theme switched");
            }
            city => {
                if let Err(err) = dashboard.change_city(city).await {
                    debug!(error = %err, city, "search failed");
                }
            }
        }

        print!("{}", dashboard.port().render());
    }

    Ok(())
}

fn hint(err: &SearchError) -> anyhow::Error {
    match err {
        SearchError::MissingApiKey => anyhow::anyhow!(
            "{}\nHint: run `weather-dash configure` or set WEATHERAPI_KEY.",
            err.user_message()
        ),
        _ => anyhow::anyhow!(err.user_message()),
    }
}
