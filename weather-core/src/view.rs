//! Typed view model for the dashboard.
//!
//! Everything here is a pure projection of snapshots into display strings;
//! presentation layers (text, terminal UI) only read these types.

use serde::Serialize;

use crate::model::{ForecastSnapshot, Units, WeatherSnapshot};

/// Decorative bucket derived from the icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCategory {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherCategory {
    /// Substring match on the 2-digit code prefixes, first hit wins.
    /// Unknown codes default to clear.
    pub fn from_icon_code(code: &str) -> Self {
        const RULES: &[(&[&str], WeatherCategory)] = &[
            (&["01"], WeatherCategory::Clear),
            (&["02"], WeatherCategory::PartlyCloudy),
            (&["03", "04"], WeatherCategory::Cloudy),
            (&["09", "10"], WeatherCategory::Rain),
            (&["11"], WeatherCategory::Thunderstorm),
            (&["13"], WeatherCategory::Snow),
            (&["50"], WeatherCategory::Mist),
        ];

        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| code.contains(n)))
            .map(|(_, category)| *category)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Mist => "mist",
        }
    }

    pub fn gradient(&self) -> Gradient {
        match self {
            Self::Clear => Gradient::new(0x667eea, 0x764ba2),
            Self::PartlyCloudy | Self::Cloudy => Gradient::new(0x4facfe, 0x00f2fe),
            Self::Rain => Gradient::new(0x09203f, 0x537895),
            Self::Thunderstorm => Gradient::new(0x434343, 0x000000),
            Self::Snow => Gradient::new(0xe6dada, 0x274046),
            Self::Mist => Gradient::new(0xbdc3c7, 0x2c3e50),
        }
    }
}

/// Two RGB stops, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub start: u32,
    pub end: u32,
}

impl Gradient {
    const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn start_rgb(&self) -> (u8, u8, u8) {
        split_rgb(self.start)
    }

    pub fn end_rgb(&self) -> (u8, u8, u8) {
        split_rgb(self.end)
    }

    /// CSS form, e.g. `linear-gradient(135deg, #667eea 0%, #764ba2 100%)`.
    pub fn css(&self) -> String {
        format!("linear-gradient(135deg, #{:06x} 0%, #{:06x} 100%)", self.start, self.end)
    }
}

fn split_rgb(rgb: u32) -> (u8, u8, u8) {
    (((rgb >> 16) & 0xff) as u8, ((rgb >> 8) & 0xff) as u8, (rgb & 0xff) as u8)
}

/// Coarse pressure heuristic: above 1010 hPa is "good".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Good,
    Reduced,
}

impl Visibility {
    pub fn from_pressure(pressure_hpa: f64) -> Self {
        if pressure_hpa > 1010.0 { Visibility::Good } else { Visibility::Reduced }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Good => "good",
            Visibility::Reduced => "reduced",
        }
    }
}

/// `{base}{code}@2x.png` for the main card, `{base}{code}.png` otherwise.
pub fn icon_url(base: &str, code: &str, large: bool) -> String {
    let suffix = if large { "@2x.png" } else { ".png" };
    format!("{base}{code}{suffix}")
}

/// What a section of the dashboard currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section<T> {
    Empty,
    Loading { city: String },
    Ready(T),
    Failed { city: String, message: String },
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Empty
    }
}

impl<T> Section<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Section::Loading { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub location: String,
    pub city: String,
    pub country: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub icon_url: String,
    pub wind: String,
    pub wind_direction: String,
    pub humidity: String,
    pub pressure: String,
    pub sun: String,
    pub visibility: Visibility,
    /// Low/high shown as "typical", temperature -5/+5.
    pub typical_range: String,
    pub units: String,
    pub observed_at: String,
    pub precipitation: Option<String>,
    pub category: WeatherCategory,
    pub gradient: Gradient,
}

impl WeatherView {
    pub fn project(snapshot: &WeatherSnapshot, units: Units, icon_base: &str) -> Self {
        let temp = &snapshot.unit_labels.temp;
        let category = WeatherCategory::from_icon_code(&snapshot.icon_code);

        let precipitation = match (snapshot.rain, snapshot.snow) {
            (Some(rain), Some(snow)) => Some(format!("rain {rain} mm, snow {snow} mm")),
            (Some(rain), None) => Some(format!("rain {rain} mm")),
            (None, Some(snow)) => Some(format!("snow {snow} mm")),
            (None, None) => None,
        };

        Self {
            location: format!("{}, {}", snapshot.city, snapshot.country),
            city: snapshot.city.clone(),
            country: snapshot.country.clone(),
            temperature: format!("{}{temp}", snapshot.temperature),
            feels_like: format!("{}{temp}", snapshot.feels_like),
            description: snapshot.description.clone(),
            icon_url: icon_url(icon_base, &snapshot.icon_code, true),
            wind: format!("{} {}", snapshot.wind_speed, snapshot.unit_labels.wind),
            wind_direction: snapshot.wind_direction.clone(),
            humidity: format!("{}%", snapshot.humidity),
            pressure: format!("{} hPa", snapshot.pressure),
            sun: format!("{} / {}", snapshot.sunrise, snapshot.sunset),
            visibility: Visibility::from_pressure(snapshot.pressure),
            typical_range: format!(
                "{}{temp} / {}{temp}",
                snapshot.temperature - 5.0,
                snapshot.temperature + 5.0
            ),
            units: units.display_name().to_string(),
            observed_at: snapshot.timestamp.clone(),
            precipitation,
            category,
            gradient: category.gradient(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub time: String,
    pub date: String,
    pub icon_url: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: Option<String>,
    pub category: WeatherCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForecastView {
    Unavailable,
    Cards(Vec<ForecastCard>),
}

impl ForecastView {
    pub const UNAVAILABLE_TITLE: &'static str = "No forecast available";
    pub const UNAVAILABLE_DETAIL: &'static str = "Forecasts are not available for this city.";

    pub fn project(snapshot: &ForecastSnapshot, icon_base: &str) -> Self {
        let ForecastSnapshot::Available { unit_labels, entries } = snapshot else {
            return ForecastView::Unavailable;
        };
        let temp = &unit_labels.temp;

        let cards = entries
            .iter()
            .map(|e| ForecastCard {
                time: e.time.clone(),
                date: e.date.clone(),
                icon_url: icon_url(icon_base, &e.icon_code, false),
                temperature: format!("{}{temp}", e.temperature),
                description: e.description.clone(),
                feels_like: format!("{}{temp}", e.feels_like),
                humidity: format!("{}%", e.humidity),
                wind: e.wind_speed.map(|w| format!("{w} {}", unit_labels.wind)),
                category: WeatherCategory::from_icon_code(&e.icon_code),
            })
            .collect();

        ForecastView::Cards(cards)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Modal {
    Error { title: String, message: String },
    Info(InfoView),
}

/// Static description of the backend the dashboard talks to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoView {
    pub base_url: String,
    pub endpoints: Vec<(String, String)>,
    pub refresh_every: String,
}

impl InfoView {
    pub fn new(base_url: &str, refresh_interval_secs: u64) -> Self {
        let refresh_every = if refresh_interval_secs % 60 == 0 {
            format!("{} min", refresh_interval_secs / 60)
        } else {
            format!("{refresh_interval_secs} s")
        };

        Self {
            base_url: base_url.to_string(),
            endpoints: vec![
                ("/api/weather".into(), "current weather (city, units, lang)".into()),
                ("/api/forecast".into(), "next 24h forecast (city, units, lang)".into()),
            ],
            refresh_every,
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardView {
    pub weather: Section<WeatherView>,
    pub forecast: Section<ForecastView>,
    pub modal: Option<Modal>,
    pub last_update: Option<String>,
}
