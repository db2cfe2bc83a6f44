use std::fmt::Write;

use weather_core::{
    DashboardView, ForecastView, Modal, Section, WeatherView, view::ForecastCard,
};

/// Plain-text rendering of the dashboard for one-shot output.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    match &view.weather {
        Section::Empty => {}
        Section::Loading { city } => {
            let _ = writeln!(out, "Loading weather data for {city}...");
        }
        Section::Ready(weather) => write_weather(&mut out, weather),
        Section::Failed { city, message } => {
            let _ = writeln!(out, "! Unable to load weather data for {city}.");
            let _ = writeln!(out, "  {message}");
        }
    }

    out.push('\n');

    match &view.forecast {
        Section::Empty => {}
        Section::Loading { city } => {
            let _ = writeln!(out, "Loading forecast for {city}...");
        }
        Section::Ready(ForecastView::Unavailable) => {
            let _ = writeln!(out, "{}", ForecastView::UNAVAILABLE_TITLE);
            let _ = writeln!(out, "  {}", ForecastView::UNAVAILABLE_DETAIL);
        }
        Section::Ready(ForecastView::Cards(cards)) => {
            let _ = writeln!(out, "Next hours");
            for card in cards {
                write_card(&mut out, card);
            }
        }
        Section::Failed { city, message } => {
            let _ = writeln!(out, "! Unable to load forecast for {city}.");
            let _ = writeln!(out, "  {message}");
        }
    }

    if let Some(Modal::Error { title, message }) = &view.modal {
        let _ = writeln!(out, "\n{title}: {message}");
    }

    if let Some(last) = &view.last_update {
        let _ = writeln!(out, "\n{last}");
    }

    out
}

fn write_weather(out: &mut String, w: &WeatherView) {
    let _ = writeln!(out, "{}", w.location);
    let _ = writeln!(out, "  {}  {}  (feels like {})", w.temperature, w.description, w.feels_like);
    let _ = writeln!(out, "  {:<12}{} {}", "Wind", w.wind, w.wind_direction);
    let _ = writeln!(out, "  {:<12}{}", "Humidity", w.humidity);
    let _ = writeln!(out, "  {:<12}{}", "Pressure", w.pressure);
    let _ = writeln!(out, "  {:<12}{}", "Visibility", w.visibility.as_str());
    let _ = writeln!(out, "  {:<12}{}", "Sun", w.sun);
    let _ = writeln!(out, "  {:<12}{}", "Typical", w.typical_range);
    if let Some(precipitation) = &w.precipitation {
        let _ = writeln!(out, "  {:<12}{}", "Precip.", precipitation);
    }
    let _ = writeln!(out, "  {:<12}{}", "Units", w.units);
    let _ = writeln!(out, "  {:<12}{}", "Observed", w.observed_at);
}

fn write_card(out: &mut String, c: &ForecastCard) {
    let _ = write!(
        out,
        "  {} {}  {:>6}  {:<22} feels {:>6}  hum {:>4}",
        c.date, c.time, c.temperature, c.description, c.feels_like, c.humidity
    );
    if let Some(wind) = &c.wind {
        let _ = write!(out, "  wind {wind}");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_forecast_renders_message() {
        let view = DashboardView {
            forecast: Section::Ready(ForecastView::Unavailable),
            ..DashboardView::default()
        };
        assert!(render(&view).contains("No forecast available"));
    }

    #[test]
    fn failed_weather_shows_server_message() {
        let view = DashboardView {
            weather: Section::Failed { city: "Atlantis".into(), message: "city not found".into() },
            ..DashboardView::default()
        };
        let out = render(&view);
        assert!(out.contains("Atlantis"));
        assert!(out.contains("city not found"));
    }

    #[test]
    fn loading_sections_name_the_city() {
        let view = DashboardView {
            weather: Section::Loading { city: "Lyon".into() },
            forecast: Section::Loading { city: "Lyon".into() },
            ..DashboardView::default()
        };
        let out = render(&view);
        assert!(out.contains("Loading weather data for Lyon"));
        assert!(out.contains("Loading forecast for Lyon"));
    }
}
