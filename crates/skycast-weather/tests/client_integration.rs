//! Integration tests for WeatherClient using wiremock.
//!
//! These tests verify forecast and geocoding behavior against a mock server.

use skycast_core::WeatherError;
use skycast_weather::{WeatherClient, WeatherCondition};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a forecast body with the given hourly temperatures
fn forecast_body(temps: &[f64]) -> serde_json::Value {
    let times: Vec<String> = (0..temps.len())
        .map(|h| format!("2026-08-23T{:02}:00", h))
        .collect();
    serde_json::json!({
        "latitude": 48.85,
        "longitude": 2.35,
        "hourly": {
            "time": times,
            "temperature_2m": temps,
        }
    })
}

#[tokio::test]
async fn test_fetch_weather_parses_hourly_and_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.85,
            "longitude": 2.35,
            "hourly": {
                "time": ["2026-08-23T00:00", "2026-08-23T01:00"],
                "temperature_2m": [21.4, 20.9],
            },
            "current_weather": {
                "temperature": 21.0,
                "windspeed": 12.5,
                "weathercode": 2,
            }
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let data = client.fetch_weather(48.85, 2.35).await.unwrap();

    assert_eq!(data.current_temperature(), Some(21.4));
    assert_eq!(data.hourly.temperature_2m, vec![21.4, 20.9]);
    assert_eq!(data.hourly.time.len(), 2);

    let current = data.current.unwrap();
    assert_eq!(current.temperature, 21.0);
    assert_eq!(current.condition, WeatherCondition::PartlyCloudy);
}

#[tokio::test]
async fn test_fetch_weather_sends_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "35.68"))
        .and(query_param("longitude", "139.69"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[27.3])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let data = client.fetch_weather(35.68, 139.69).await.unwrap();

    assert_eq!(data.current_temperature(), Some(27.3));
}

#[tokio::test]
async fn test_fetch_weather_empty_series_has_no_temperature() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[])))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let data = client.fetch_weather(48.85, 2.35).await.unwrap();

    assert_eq!(data.current_temperature(), None);
    assert!(data.hourly.temperature_2m.is_empty());
}

#[tokio::test]
async fn test_fetch_weather_missing_hourly_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.85,
            "longitude": 2.35,
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let result = client.fetch_weather(48.85, 2.35).await;

    assert!(matches!(result, Err(WeatherError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_weather_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let result = client.fetch_weather(48.85, 2.35).await;

    assert!(matches!(result, Err(WeatherError::Http(500))));
}

#[tokio::test]
async fn test_search_location_returns_places() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": "Paris", "latitude": 48.85, "longitude": 2.35, "country": "France"},
                {"name": "Paris", "latitude": 33.66, "longitude": -95.55, "country": "United States"},
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let places = client.search_location("Paris").await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].display_name(), "Paris, France");
    assert_eq!(places[0].latitude, 48.85);
    assert_eq!(places[1].display_name(), "Paris, United States");
}

#[tokio::test]
async fn test_search_location_no_results_field() {
    let mock_server = MockServer::start().await;

    // Open-Meteo omits `results` entirely when nothing matches
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.5
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let places = client.search_location("Xyzzyville").await.unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_search_location_empty_query_skips_request() {
    // No mocks mounted: any request would come back 404 and fail the call
    let mock_server = MockServer::start().await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();

    assert!(client.search_location("").await.unwrap().is_empty());
    assert!(client.search_location("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_geocode_picks_first_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": "Springfield", "latitude": 39.80, "longitude": -89.64, "country": "United States"},
                {"name": "Springfield", "latitude": 42.10, "longitude": -72.59, "country": "United States"},
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let place = client.geocode("Springfield").await.unwrap();

    assert_eq!(place.latitude, 39.80);
    assert_eq!(place.longitude, -89.64);
}

#[tokio::test]
async fn test_geocode_no_match_is_location_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::with_endpoints(mock_server.uri(), mock_server.uri()).unwrap();
    let result = client.geocode("Atlantis").await;

    match result {
        Err(WeatherError::LocationNotFound(query)) => assert_eq!(query, "Atlantis"),
        other => panic!("Expected LocationNotFound, got {:?}", other.map(|p| p.name)),
    }
}
