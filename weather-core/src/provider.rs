use crate::{
    Config,
    error::WeatherError,
    model::{FetchRequest, ForecastSnapshot, WeatherSnapshot},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod backend;

pub use backend::BackendProvider;

/// Source of current-weather and forecast data.
///
/// The two calls are independent: either may fail without affecting the other.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, request: &FetchRequest) -> Result<WeatherSnapshot, WeatherError>;

    async fn fetch_forecast(&self, request: &FetchRequest) -> Result<ForecastSnapshot, WeatherError>;
}

/// Construct the HTTP provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let provider = BackendProvider::with_timeout(&config.api_base_url, config.request_timeout())?;
    Ok(Box::new(provider))
}
