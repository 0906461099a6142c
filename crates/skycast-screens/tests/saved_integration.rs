//! Integration tests for the saved locations screen.
//!
//! Covers the fan-out refresh (one lookup per row, joined before the view
//! updates), per-row failure isolation, cancellation, and removal.

use std::time::Duration;

use skycast_screens::SavedLocationsScreen;
use skycast_store::LocationClient;
use skycast_weather::WeatherClient;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 0.0,
        "longitude": 0.0,
        "hourly": {
            "time": ["2026-08-23T00:00"],
            "temperature_2m": [temp],
        }
    })
}

/// Mount a geocode hit plus a forecast for one city.
async fn mount_city(server: &MockServer, city: &str, latitude: f64, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": city, "latitude": latitude, "longitude": 10.0, "country": "Testland"},
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", latitude.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(temp)))
        .mount(server)
        .await;
}

/// Mount a geocode miss (empty results) for one city.
async fn mount_unknown_city(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(server)
        .await;
}

fn screen_with(server: &MockServer) -> (SavedLocationsScreen, LocationClient) {
    let locations = LocationClient::in_memory().unwrap();
    let weather = WeatherClient::with_endpoints(server.uri(), server.uri()).unwrap();
    (
        SavedLocationsScreen::new(locations.clone(), weather),
        locations,
    )
}

#[tokio::test]
async fn test_refresh_merges_weather_per_row() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", 48.85, 21.5).await;
    mount_city(&server, "Tokyo", 35.68, 27.3).await;

    let (mut screen, locations) = screen_with(&server);
    locations.create("Paris").await.unwrap();
    locations.create("Tokyo").await.unwrap();

    screen.refresh(&CancellationToken::new()).await;

    assert_eq!(screen.error(), None);
    let rows = screen.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].city, "Paris");
    assert_eq!(
        rows[0].weather.as_ref().unwrap().current_temperature(),
        Some(21.5)
    );
    assert_eq!(rows[1].city, "Tokyo");
    assert_eq!(
        rows[1].weather.as_ref().unwrap().current_temperature(),
        Some(27.3)
    );
}

#[tokio::test]
async fn test_refresh_empty_store_yields_no_rows() {
    let server = MockServer::start().await;

    let (mut screen, _) = screen_with(&server);
    screen.refresh(&CancellationToken::new()).await;

    assert_eq!(screen.error(), None);
    assert!(screen.rows().is_empty());
}

#[tokio::test]
async fn test_failed_geocode_is_isolated_to_its_row() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", 48.85, 21.5).await;
    mount_unknown_city(&server, "Atlantis").await;

    let (mut screen, locations) = screen_with(&server);
    locations.create("Paris").await.unwrap();
    locations.create("Atlantis").await.unwrap();

    screen.refresh(&CancellationToken::new()).await;

    let rows = screen.rows();
    assert_eq!(rows.len(), 2);

    assert!(rows[0].weather.is_some());
    assert_eq!(rows[0].error, None);

    assert!(rows[1].weather.is_none());
    assert_eq!(rows[1].error, Some("Location not found"));

    // A per-row failure is not a screen failure
    assert_eq!(screen.error(), None);
}

#[tokio::test]
async fn test_cancelled_refresh_leaves_state_unchanged() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", 48.85, 21.5).await;

    let (mut screen, locations) = screen_with(&server);
    locations.create("Paris").await.unwrap();

    // Populate the screen once
    screen.refresh(&CancellationToken::new()).await;
    assert_eq!(screen.rows().len(), 1);

    // Save a second city whose lookup will never answer in time
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Tokyo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"results": []}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;
    locations.create("Tokyo").await.unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    screen.refresh(&cancel).await;

    // Prior rows survive; the half-finished refresh never landed
    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.rows()[0].city, "Paris");
}

#[tokio::test]
async fn test_remove_location_updates_store_and_view() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", 48.85, 21.5).await;
    mount_city(&server, "Tokyo", 35.68, 27.3).await;

    let (mut screen, locations) = screen_with(&server);
    let paris = locations.create("Paris").await.unwrap();
    locations.create("Tokyo").await.unwrap();

    screen.refresh(&CancellationToken::new()).await;
    assert_eq!(screen.rows().len(), 2);

    screen.remove_location(paris.id).await;

    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.rows()[0].city, "Tokyo");

    let stored = locations.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].city, "Tokyo");
}

#[tokio::test]
async fn test_remove_missing_id_is_quiet() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris", 48.85, 21.5).await;

    let (mut screen, locations) = screen_with(&server);
    locations.create("Paris").await.unwrap();

    screen.refresh(&CancellationToken::new()).await;
    screen.remove_location(42_000).await;

    assert_eq!(screen.error(), None);
    assert_eq!(screen.rows().len(), 1);
}
