//! Integration tests for BackendProvider using wiremock.

use weather_core::{
    BackendProvider, FetchRequest, ForecastSnapshot, MAX_FORECAST_ENTRIES, Units, WeatherError,
    WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris(units: Units) -> FetchRequest {
    FetchRequest { city: "Paris".into(), units, lang: "fr".into() }
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "city": "Paris",
        "country": "FR",
        "temperature": 18,
        "feels_like": 17,
        "humidity": 64,
        "pressure": 1015,
        "wind_speed": 3.6,
        "wind_direction": "NO",
        "description": "Peu nuageux",
        "icon": "02d",
        "sunrise": "07:12",
        "sunset": "19:40",
        "units": { "temp": "°C", "wind": "m/s" },
        "timestamp": "14/10/2026 14:00"
    })
}

fn forecast_entry(hour: usize) -> serde_json::Value {
    serde_json::json!({
        "time": format!("{:02}:00", hour * 3 % 24),
        "date": "14/10",
        "temperature": 15,
        "feels_like": 14,
        "humidity": 80,
        "description": "Pluie légère",
        "icon": "10d",
        "wind_speed": 4.1
    })
}

#[tokio::test]
async fn fetch_current_sends_query_and_parses_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", "Paris"))
        .and(query_param("units", "imperial"))
        .and(query_param("lang", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let snapshot = provider.fetch_current(&paris(Units::Imperial)).await.unwrap();

    assert_eq!(snapshot.city, "Paris");
    assert_eq!(snapshot.icon_code, "02d");
    assert_eq!(snapshot.pressure, 1015.0);
    assert_eq!(snapshot.unit_labels.temp, "°C");
}

#[tokio::test]
async fn error_field_on_200_is_an_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": "city not found" })),
        )
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let err = provider.fetch_current(&paris(Units::Metric)).await.unwrap_err();

    match err {
        WeatherError::Api { message } => assert_eq!(message, "city not found"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_status_is_an_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Erreur serveur" })),
        )
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let err = provider.fetch_current(&paris(Units::Metric)).await.unwrap_err();

    assert!(matches!(err, WeatherError::Http { status: 503 }), "got {err:?}");
}

#[tokio::test]
async fn forecast_is_truncated_to_eight_entries() {
    let mock_server = MockServer::start().await;

    let forecasts: Vec<_> = (0..40).map(forecast_entry).collect();
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Paris",
            "country": "FR",
            "forecasts": forecasts,
            "units": { "temp": "°C", "wind": "m/s" }
        })))
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let forecast = provider.fetch_forecast(&paris(Units::Metric)).await.unwrap();

    assert_eq!(forecast.entries().len(), MAX_FORECAST_ENTRIES);
    assert_eq!(forecast.entries()[0].time, "00:00");
    assert_eq!(forecast.entries()[7].time, "21:00");
}

#[tokio::test]
async fn empty_forecast_list_is_unavailable_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "units": { "temp": "°C", "wind": "m/s" },
            "forecasts": []
        })))
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let forecast = provider.fetch_forecast(&paris(Units::Metric)).await.unwrap();

    assert_eq!(forecast, ForecastSnapshot::Unavailable);
}

#[tokio::test]
async fn forecast_without_units_uses_request_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "forecasts": [forecast_entry(1)] })),
        )
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let forecast = provider.fetch_forecast(&paris(Units::Imperial)).await.unwrap();

    match forecast {
        ForecastSnapshot::Available { unit_labels, entries } => {
            assert_eq!(unit_labels.temp, "°F");
            assert_eq!(entries.len(), 1);
        }
        ForecastSnapshot::Unavailable => panic!("expected entries"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = BackendProvider::new(&mock_server.uri());
    let err = provider.fetch_current(&paris(Units::Metric)).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let provider = BackendProvider::new(&uri);
    let err = provider.fetch_current(&paris(Units::Metric)).await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
}
