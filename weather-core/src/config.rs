use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{model::Units, preferences::Preferences};

/// Dashboard configuration.
///
/// `Config::default()` is the built-in constant set; a TOML file may override
/// any subset of fields.
///
/// Example TOML:
/// ```toml
/// api_base_url = "http://weather.lan:5000"
/// default_city = "Lyon"
/// default_units = "imperial"
/// refresh_interval_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub default_city: String,
    pub default_units: Units,
    pub default_lang: String,
    pub refresh_interval_secs: u64,
    pub icon_base_url: String,
    pub favorite_cities: Vec<String>,
    /// No timeout when absent: a hung request keeps the section loading.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".into(),
            default_city: "Paris".into(),
            default_units: Units::Metric,
            default_lang: "fr".into(),
            refresh_interval_secs: 300,
            icon_base_url: "https://openweathermap.org/img/wn/".into(),
            favorite_cities: ["Paris", "London", "New York", "Tokyo", "Sydney"]
                .into_iter()
                .map(String::from)
                .collect(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if self.default_city.trim().is_empty() {
            bail!("default_city must not be empty");
        }
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Initial session preferences.
    pub fn preferences(&self) -> Result<Preferences> {
        Preferences::new(&self.default_city, self.default_units, &self.default_lang)
            .context("default_city is not a usable city name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(300));
        assert_eq!(cfg.request_timeout(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_preferences_follow_config() {
        let prefs = Config::default().preferences().expect("defaults are valid");
        assert_eq!(prefs.city(), "Paris");
        assert_eq!(prefs.units(), Units::Metric);
        assert_eq!(prefs.language(), "fr");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_city = \"Lyon\"\ndefault_units = \"imperial\"").unwrap();

        let cfg = Config::load_from(file.path()).expect("valid partial config");
        assert_eq!(cfg.default_city, "Lyon");
        assert_eq!(cfg.default_units, Units::Imperial);
        assert_eq!(cfg.api_base_url, Config::default().api_base_url);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_secs = 0").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("refresh_interval_secs"));
    }

    #[test]
    fn blank_default_city_is_rejected() {
        let cfg = Config { default_city: "  ".into(), ..Config::default() };
        assert!(cfg.validate().is_err());
        assert!(cfg.preferences().is_err());
    }

    #[test]
    fn unparsable_file_names_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_secs = \"soon\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
