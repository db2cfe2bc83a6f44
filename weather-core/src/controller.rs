//! Refresh controller: owns the session state and decides when a refresh
//! cycle may start.
//!
//! The controller never performs I/O. [`RefreshController::refresh`] hands
//! back a [`RefreshCycle`] describing the two fetches to issue (or `None`
//! when a cycle is already in flight); the fetch results come back through
//! [`RefreshController::apply`] in whatever order they complete.

use chrono::{DateTime, Local};

use crate::{
    Config,
    error::WeatherError,
    model::{FetchRequest, ForecastSnapshot, Units, WeatherSnapshot},
    preferences::Preferences,
    view::{DashboardView, ForecastView, InfoView, Modal, Section, WeatherView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Initial,
    Manual,
    PreferenceChange,
    Timer,
}

/// One coordinated attempt to fetch both sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCycle {
    pub id: u64,
    pub trigger: RefreshTrigger,
    pub request: FetchRequest,
}

#[derive(Debug)]
pub enum FetchResult {
    Current(Result<WeatherSnapshot, WeatherError>),
    Forecast(Result<ForecastSnapshot, WeatherError>),
}

/// A completed fetch, tagged with the cycle that issued it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub cycle: u64,
    pub result: FetchResult,
}

pub const WEATHER_ERROR_TITLE: &str = "Unable to load weather data";

#[derive(Debug)]
pub struct RefreshController {
    prefs: Preferences,
    state: RefreshState,
    last_update: Option<DateTime<Local>>,
    weather: Option<WeatherSnapshot>,
    forecast: Option<ForecastSnapshot>,
    view: DashboardView,
    icon_base: String,
    info: InfoView,
    /// Id and city of the most recently issued cycle.
    latest_cycle: u64,
    latest_city: String,
    /// Cycle whose current-weather fetch is still in flight.
    in_flight: Option<RefreshCycle>,
}

impl RefreshController {
    pub fn new(prefs: Preferences, config: &Config) -> Self {
        Self {
            prefs,
            state: RefreshState::Idle,
            last_update: None,
            weather: None,
            forecast: None,
            view: DashboardView::default(),
            icon_base: config.icon_base_url.clone(),
            info: InfoView::new(&config.api_base_url, config.refresh_interval_secs),
            latest_cycle: 0,
            latest_city: String::new(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == RefreshState::Loading
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastSnapshot> {
        self.forecast.as_ref()
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Start a refresh cycle unless one is already loading.
    ///
    /// While loading, the request is dropped and `None` is returned: callers
    /// must not issue any fetch in that case.
    pub fn refresh(&mut self, trigger: RefreshTrigger) -> Option<RefreshCycle> {
        if self.is_loading() {
            tracing::debug!(?trigger, "refresh already in flight, dropping request");
            return None;
        }

        self.latest_cycle += 1;
        let cycle = RefreshCycle {
            id: self.latest_cycle,
            trigger,
            request: self.prefs.to_request(),
        };

        tracing::info!(
            cycle = cycle.id,
            ?trigger,
            city = %cycle.request.city,
            units = %cycle.request.units,
            "starting refresh"
        );

        self.state = RefreshState::Loading;
        let city = cycle.request.city.clone();
        self.latest_city = city.clone();
        self.view.weather = Section::Loading { city: city.clone() };
        self.view.forecast = Section::Loading { city };
        self.in_flight = Some(cycle.clone());

        Some(cycle)
    }

    /// Change city and refresh. A blank name is rejected before any request.
    pub fn set_city(&mut self, name: &str) -> Result<Option<RefreshCycle>, WeatherError> {
        self.prefs.set_city(name)?;
        Ok(self.refresh(RefreshTrigger::PreferenceChange))
    }

    pub fn set_units(&mut self, units: Units) -> Option<RefreshCycle> {
        self.prefs.set_units(units);
        self.refresh(RefreshTrigger::PreferenceChange)
    }

    pub fn toggle_units(&mut self) -> Option<RefreshCycle> {
        self.set_units(self.prefs.units().toggled())
    }

    /// Record a completed fetch. `now` stamps a successful current-weather result.
    pub fn apply(&mut self, outcome: FetchOutcome, now: DateTime<Local>) {
        match outcome.result {
            FetchResult::Current(result) => self.apply_current(outcome.cycle, result, now),
            FetchResult::Forecast(result) => self.apply_forecast(outcome.cycle, result),
        }
    }

    fn apply_current(
        &mut self,
        cycle_id: u64,
        result: Result<WeatherSnapshot, WeatherError>,
        now: DateTime<Local>,
    ) {
        let cycle = match self.in_flight.take() {
            Some(cycle) if cycle.id == cycle_id => cycle,
            other => {
                self.in_flight = other;
                tracing::warn!(cycle = cycle_id, "ignoring current weather for a finished cycle");
                return;
            }
        };

        match result {
            Ok(snapshot) => {
                tracing::info!(cycle = cycle_id, city = %snapshot.city, "current weather updated");
                self.view.weather = Section::Ready(WeatherView::project(
                    &snapshot,
                    cycle.request.units,
                    &self.icon_base,
                ));
                self.weather = Some(snapshot);
                self.last_update = Some(now);
                self.view.last_update = Some(format!("Last update: {}", now.format("%H:%M")));
                self.state = RefreshState::Success;
            }
            Err(err) => {
                tracing::error!(
                    cycle = cycle_id,
                    city = %cycle.request.city,
                    "failed to load current weather: {err}"
                );
                let message = err.to_string();
                self.view.weather = Section::Failed {
                    city: cycle.request.city,
                    message: message.clone(),
                };
                self.view.modal = Some(Modal::Error {
                    title: WEATHER_ERROR_TITLE.to_string(),
                    message,
                });
                self.state = RefreshState::Failed;
            }
        }
    }

    fn apply_forecast(&mut self, cycle_id: u64, result: Result<ForecastSnapshot, WeatherError>) {
        if cycle_id != self.latest_cycle {
            tracing::warn!(
                cycle = cycle_id,
                latest = self.latest_cycle,
                "discarding forecast from a superseded cycle"
            );
            return;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    cycle = cycle_id,
                    entries = snapshot.entries().len(),
                    "forecast updated"
                );
                self.view.forecast = Section::Ready(ForecastView::project(&snapshot, &self.icon_base));
                self.forecast = Some(snapshot);
            }
            Err(err) => {
                tracing::error!(cycle = cycle_id, "failed to load forecast: {err}");
                self.view.forecast = Section::Failed {
                    city: self.latest_city.clone(),
                    message: err.to_string(),
                };
            }
        }
    }

    pub fn show_info(&mut self) {
        self.view.modal = Some(Modal::Info(self.info.clone()));
    }

    pub fn dismiss_modal(&mut self) {
        self.view.modal = None;
    }
}
