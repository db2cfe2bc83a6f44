use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Instant, MissedTickBehavior};
use weather_core::{Config, Dispatcher, Preferences, RefreshTrigger, WeatherProvider};

use crate::{app::App, ui};

/// How often pending key presses are drained.
const INPUT_POLL: Duration = Duration::from_millis(50);

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(
    config: &Config,
    prefs: Preferences,
    provider: Arc<dyn WeatherProvider>,
) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    let res = event_loop(&mut terminal, config, prefs, provider).await;
    restore_terminal(&mut terminal)?;
    res
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Tui,
    config: &Config,
    prefs: Preferences,
    provider: Arc<dyn WeatherProvider>,
) -> anyhow::Result<()> {
    let (dispatcher, mut outcomes) = Dispatcher::new(provider);
    let mut app = App::new(config, prefs);

    if let Some(cycle) = app.controller.refresh(RefreshTrigger::Initial) {
        dispatcher.dispatch(&cycle);
    }

    let period = config.refresh_interval();
    let mut refresh_timer = tokio::time::interval_at(Instant::now() + period, period);
    refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut input_timer = tokio::time::interval(INPUT_POLL);

    tracing::info!(every = ?period, "dashboard started");

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            Some(outcome) = outcomes.recv() => app.controller.apply(outcome, Local::now()),
            _ = refresh_timer.tick() => {
                if let Some(cycle) = app.controller.refresh(RefreshTrigger::Timer) {
                    dispatcher.dispatch(&cycle);
                }
            }
            _ = input_timer.tick() => {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if let Some(cycle) = app.handle_key(key) {
                            dispatcher.dispatch(&cycle);
                        }
                    }
                }
            }
        }
    }

    tracing::info!("dashboard closed");
    Ok(())
}
