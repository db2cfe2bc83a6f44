use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use weather_core::{
    Config, Dispatcher, Preferences, RefreshController, RefreshState, RefreshTrigger, Units,
    WeatherError, WeatherProvider, provider::provider_from_config,
};

use crate::{dashboard, logging, text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(flatten)]
    pub opts: Overrides,

    /// Defaults to `watch`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags layered over the config file.
#[derive(Debug, Args)]
pub struct Overrides {
    /// Read configuration from this TOML file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// City to show.
    #[arg(long, global = true)]
    pub city: Option<String>,

    /// Unit system: metric or imperial.
    #[arg(long, global = true)]
    pub units: Option<Units>,

    /// Language for weather descriptions, e.g. "fr" or "en".
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Backend base URL, e.g. http://127.0.0.1:5000.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Auto-refresh interval in seconds.
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Write logs to this file (the dashboard logs nowhere otherwise).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once and print current weather and forecast.
    Show,

    /// Ask for a city and unit system, then print like `show`.
    Search,

    /// Auto-refreshing terminal dashboard.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Watch);
        let config = self.opts.resolve_config()?;

        match (&command, &self.opts.log_file) {
            (_, Some(path)) => logging::init_file(path)?,
            (Command::Watch, None) => {}
            (_, None) => logging::init_stderr()?,
        }

        let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(&config)?);
        let prefs = config.preferences()?;

        tracing::debug!(?config, "configuration resolved");

        match command {
            Command::Show => show(&config, prefs, provider).await,
            Command::Search => {
                let prefs = prompt_preferences(prefs)?;
                show(&config, prefs, provider).await
            }
            Command::Watch => dashboard::run(&config, prefs, provider).await,
        }
    }
}

impl Overrides {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(city) = &self.city {
            config.default_city = city.clone();
        }
        if let Some(units) = self.units {
            config.default_units = units;
        }
        if let Some(lang) = &self.lang {
            config.default_lang = lang.clone();
        }
        if let Some(url) = &self.base_url {
            config.api_base_url = url.clone();
        }
        if let Some(secs) = self.interval {
            config.refresh_interval_secs = secs;
        }

        config.validate().context("Invalid command-line overrides")?;
        Ok(config)
    }
}

/// One refresh cycle, printed as text. Fails after printing when current weather failed.
async fn show(
    config: &Config,
    prefs: Preferences,
    provider: Arc<dyn WeatherProvider>,
) -> anyhow::Result<()> {
    let mut controller = RefreshController::new(prefs, config);
    let (dispatcher, mut outcomes) = Dispatcher::new(provider);

    if let Some(cycle) = controller.refresh(RefreshTrigger::Initial) {
        dispatcher.dispatch(&cycle);
        for _ in 0..2 {
            let Some(outcome) = outcomes.recv().await else { break };
            controller.apply(outcome, Local::now());
        }
    }

    print!("{}", text::render(controller.view()));

    if controller.state() == RefreshState::Failed {
        bail!("Could not load weather for {}", controller.preferences().city());
    }
    Ok(())
}

fn prompt_preferences(mut prefs: Preferences) -> anyhow::Result<Preferences> {
    loop {
        let city = inquire::Text::new("City:")
            .with_default(prefs.city())
            .prompt()
            .context("City prompt cancelled")?;

        match prefs.set_city(&city) {
            Ok(()) => break,
            Err(err @ WeatherError::Validation(_)) => println!("{}", err.user_message()),
            Err(err) => return Err(err.into()),
        }
    }

    let options = vec![Units::Metric, Units::Imperial];
    let start = options.iter().position(|u| *u == prefs.units()).unwrap_or(0);
    let units = inquire::Select::new("Units:", options)
        .with_starting_cursor(start)
        .prompt()
        .context("Units prompt cancelled")?;
    prefs.set_units(units);

    Ok(prefs)
}
