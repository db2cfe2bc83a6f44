//! Controller + dispatcher driven against a counting fake provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::{Semaphore, mpsc};
use weather_core::{
    Config, Dispatcher, FetchOutcome, FetchRequest, ForecastSnapshot, ForecastView, RefreshController,
    RefreshState, RefreshTrigger, Section, UnitLabels, WeatherError, WeatherProvider,
    WeatherSnapshot,
};

#[derive(Debug)]
struct FakeProvider {
    current_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
    /// Current-weather fetches wait for a permit, so a test can hold a cycle in flight.
    gate: Semaphore,
    current: fn(&FetchRequest) -> Result<WeatherSnapshot, WeatherError>,
}

impl FakeProvider {
    fn new(current: fn(&FetchRequest) -> Result<WeatherSnapshot, WeatherError>) -> Arc<Self> {
        Arc::new(Self {
            current_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            current,
        })
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_current(&self, request: &FetchRequest) -> Result<WeatherSnapshot, WeatherError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self.gate.acquire().await.map_err(|e| WeatherError::Parse(e.to_string()))?;
        (self.current)(request)
    }

    async fn fetch_forecast(&self, _request: &FetchRequest) -> Result<ForecastSnapshot, WeatherError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ForecastSnapshot::from_entries(UnitLabels::default(), Vec::new()))
    }
}

fn sunny(request: &FetchRequest) -> Result<WeatherSnapshot, WeatherError> {
    Ok(WeatherSnapshot {
        city: request.city.clone(),
        country: "FR".into(),
        temperature: 21.0,
        feels_like: 20.0,
        humidity: 40,
        pressure: 1020.0,
        wind_speed: 2.0,
        wind_direction: "S".into(),
        icon_code: "01d".into(),
        description: "Clear sky".into(),
        sunrise: "07:10".into(),
        sunset: "19:42".into(),
        timestamp: "14/10/2026 12:00".into(),
        unit_labels: request.units.labels(),
        rain: None,
        snow: None,
    })
}

fn not_found(_: &FetchRequest) -> Result<WeatherSnapshot, WeatherError> {
    Err(WeatherError::Api { message: "city not found".into() })
}

fn controller() -> RefreshController {
    let config = Config::default();
    RefreshController::new(config.preferences().unwrap(), &config)
}

async fn next(rx: &mut mpsc::UnboundedReceiver<FetchOutcome>) -> FetchOutcome {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("outcome within timeout")
        .expect("channel open")
}

#[tokio::test]
async fn refresh_while_loading_does_not_fetch_again() {
    let provider = FakeProvider::new(sunny);
    let (dispatcher, mut rx) = Dispatcher::new(provider.clone());
    let mut ctl = controller();

    let cycle = ctl.refresh(RefreshTrigger::Initial).expect("first cycle");
    dispatcher.dispatch(&cycle);

    // Forecast completes while current weather is held back.
    let outcome = next(&mut rx).await;
    ctl.apply(outcome, Local::now());
    assert_eq!(ctl.state(), RefreshState::Loading);

    for trigger in [RefreshTrigger::Timer, RefreshTrigger::Manual] {
        if let Some(extra) = ctl.refresh(trigger) {
            dispatcher.dispatch(&extra);
        }
    }

    provider.gate.add_permits(1);
    let outcome = next(&mut rx).await;
    ctl.apply(outcome, Local::now());

    assert_eq!(ctl.state(), RefreshState::Success);
    assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
    assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.view().forecast, Section::Ready(ForecastView::Unavailable));
}

#[tokio::test]
async fn api_error_scenario_leaves_timestamp_unset() {
    let provider = FakeProvider::new(not_found);
    provider.gate.add_permits(1);
    let (dispatcher, mut rx) = Dispatcher::new(provider.clone());
    let mut ctl = controller();

    let cycle = ctl.refresh(RefreshTrigger::Initial).unwrap();
    dispatcher.dispatch(&cycle);
    for _ in 0..2 {
        let outcome = next(&mut rx).await;
        ctl.apply(outcome, Local::now());
    }

    assert_eq!(ctl.state(), RefreshState::Failed);
    assert!(ctl.last_update().is_none());
    assert!(matches!(
        &ctl.view().weather,
        Section::Failed { message, .. } if message == "city not found"
    ));
}

#[tokio::test]
async fn city_change_after_success_starts_a_new_cycle() {
    let provider = FakeProvider::new(sunny);
    provider.gate.add_permits(2);
    let (dispatcher, mut rx) = Dispatcher::new(provider.clone());
    let mut ctl = controller();

    let cycle = ctl.refresh(RefreshTrigger::Initial).unwrap();
    dispatcher.dispatch(&cycle);
    for _ in 0..2 {
        let outcome = next(&mut rx).await;
        ctl.apply(outcome, Local::now());
    }
    assert!(ctl.set_city("").is_err());

    let cycle = ctl.set_city("Lyon").unwrap().expect("second cycle");
    dispatcher.dispatch(&cycle);
    for _ in 0..2 {
        let outcome = next(&mut rx).await;
        ctl.apply(outcome, Local::now());
    }

    assert_eq!(provider.current_calls.load(Ordering::SeqCst), 2);
    assert_eq!(ctl.weather().map(|w| w.city.as_str()), Some("Lyon"));
}
