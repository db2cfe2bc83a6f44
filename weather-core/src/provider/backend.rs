use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{FetchRequest, ForecastEntry, ForecastSnapshot, UnitLabels, WeatherSnapshot},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/api/weather";
const FORECAST_PATH: &str = "/api/forecast";

/// Client for the dashboard backend (`/api/weather`, `/api/forecast`).
#[derive(Debug, Clone)]
pub struct BackendProvider {
    base_url: String,
    http: Client,
}

impl BackendProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Like [`BackendProvider::new`] but with an optional per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &FetchRequest,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("city", request.city.as_str()),
                ("units", request.units.as_str()),
                ("lang", request.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!("{url} answered {status}");
            return Err(WeatherError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        decode_body(&body)
    }
}

/// Parse a 2xx body, turning a truthy `error` field into [`WeatherError::Api`].
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, WeatherError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        WeatherError::Parse(format!("{e} in body: {}", truncate_body(body)))
    })?;

    if let Some(message) = value.get("error").and_then(api_error_message) {
        return Err(WeatherError::Api { message });
    }

    serde_json::from_value(value).map_err(|e| WeatherError::Parse(e.to_string()))
}

fn api_error_message(field: &Value) -> Option<String> {
    match field {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct ForecastBody {
    #[serde(default)]
    units: Option<UnitLabels>,
    #[serde(default)]
    forecasts: Vec<ForecastEntry>,
}

#[async_trait]
impl WeatherProvider for BackendProvider {
    async fn fetch_current(&self, request: &FetchRequest) -> Result<WeatherSnapshot, WeatherError> {
        self.get_json(CURRENT_PATH, request).await
    }

    async fn fetch_forecast(&self, request: &FetchRequest) -> Result<ForecastSnapshot, WeatherError> {
        let body: ForecastBody = self.get_json(FORECAST_PATH, request).await?;
        let labels = body.units.unwrap_or_else(|| request.units.labels());
        Ok(ForecastSnapshot::from_entries(labels, body.forecasts))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
