//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration and session preferences
//! - The fetch client for the dashboard backend
//! - The refresh controller and its fetch dispatcher
//! - The typed view model the presentation layers render
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod preferences;
pub mod provider;
pub mod view;

pub use config::Config;
pub use controller::{
    FetchOutcome, FetchResult, RefreshController, RefreshCycle, RefreshState, RefreshTrigger,
};
pub use dispatch::Dispatcher;
pub use error::WeatherError;
pub use model::{
    FetchRequest, ForecastEntry, ForecastSnapshot, MAX_FORECAST_ENTRIES, UnitLabels, Units,
    WeatherSnapshot,
};
pub use preferences::Preferences;
pub use provider::{BackendProvider, WeatherProvider};
pub use view::{DashboardView, ForecastView, Modal, Section, Visibility, WeatherCategory, WeatherView};
