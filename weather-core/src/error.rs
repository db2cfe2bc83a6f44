use thiserror::Error;

/// Errors produced by preference mutation and by the fetch layer.
///
/// None of these are fatal: the controller records them against the affected
/// section and the next refresh trigger gets a fresh chance.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Rejected user input, e.g. an empty city name. No request is issued.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The backend answered 2xx but the body carried an `error` field.
    #[error("{message}")]
    Api { message: String },

    /// Transport failure (DNS, refused connection, broken body stream).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not the JSON shape we expect.
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl WeatherError {
    /// A short sentence suitable as a modal title or hint line.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Validation(_) => "Please enter a city name.",
            WeatherError::Http { status } if *status >= 500 => {
                "The weather server is having trouble. Please try again later."
            }
            WeatherError::Http { .. } => "The weather request was rejected.",
            WeatherError::Api { .. } => "The weather service reported a problem.",
            WeatherError::Network(_) => "Unable to reach the weather server.",
            WeatherError::Parse(_) => "Received an unexpected response from the weather server.",
        }
    }
}
