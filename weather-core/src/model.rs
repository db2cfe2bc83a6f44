use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Cap on forecast entries kept per fetch: the next ~24h at 3-hour steps.
pub const MAX_FORECAST_ENTRIES: usize = 8;

/// Unit system passed through to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    /// Labels used when the server did not send any.
    pub fn labels(&self) -> UnitLabels {
        match self {
            Units::Metric => UnitLabels { temp: "°C".into(), wind: "m/s".into() },
            Units::Imperial => UnitLabels { temp: "°F".into(), wind: "mph".into() },
        }
    }

    /// Human label, e.g. `Metric (°C)`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Units::Metric => "Metric (°C)",
            Units::Imperial => "Imperial (°F)",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(WeatherError::Validation(format!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            ))),
        }
    }
}

impl std::str::FromStr for Units {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub temp: String,
    pub wind: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Units::Metric.labels()
    }
}

/// Parameters of one GET against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub city: String,
    pub units: Units,
    pub lang: String,
}

/// Current conditions as formatted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_direction: String,
    #[serde(rename = "icon")]
    pub icon_code: String,
    pub description: String,
    pub sunrise: String,
    pub sunset: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "units", default)]
    pub unit_labels: UnitLabels,
    /// Rain volume for the last hour, mm.
    #[serde(default)]
    pub rain: Option<f64>,
    /// Snow volume for the last hour, mm.
    #[serde(default)]
    pub snow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: String,
    pub date: String,
    #[serde(rename = "icon")]
    pub icon_code: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub description: String,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// Forecast for the next hours, or an explicit "nothing to show".
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastSnapshot {
    Available { unit_labels: UnitLabels, entries: Vec<ForecastEntry> },
    Unavailable,
}

impl ForecastSnapshot {
    /// Keeps at most [`MAX_FORECAST_ENTRIES`]; an empty list becomes `Unavailable`.
    pub fn from_entries(unit_labels: UnitLabels, mut entries: Vec<ForecastEntry>) -> Self {
        if entries.is_empty() {
            return ForecastSnapshot::Unavailable;
        }
        entries.truncate(MAX_FORECAST_ENTRIES);
        ForecastSnapshot::Available { unit_labels, entries }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        match self {
            ForecastSnapshot::Available { entries, .. } => entries,
            ForecastSnapshot::Unavailable => &[],
        }
    }
}
