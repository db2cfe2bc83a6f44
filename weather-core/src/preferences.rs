use crate::{
    error::WeatherError,
    model::{FetchRequest, Units},
};

/// Session-only user choices. Mutated by explicit user action; any refresh
/// that should follow a change is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    city: String,
    units: Units,
    language: String,
}

impl Preferences {
    /// Build preferences, validating the city the same way [`set_city`] does.
    ///
    /// [`set_city`]: Preferences::set_city
    pub fn new(city: &str, units: Units, language: &str) -> Result<Self, WeatherError> {
        let mut prefs = Self { city: String::new(), units, language: language.trim().to_string() };
        prefs.set_city(city)?;
        Ok(prefs)
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Store a trimmed city name. Empty (after trim) is rejected and leaves
    /// the previous city in place.
    pub fn set_city(&mut self, name: &str) -> Result<(), WeatherError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::Validation("city name must not be empty".into()));
        }
        self.city = trimmed.to_string();
        Ok(())
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.trim().to_string();
    }

    pub fn to_request(&self) -> FetchRequest {
        FetchRequest {
            city: self.city.clone(),
            units: self.units,
            lang: self.language.clone(),
        }
    }
}
