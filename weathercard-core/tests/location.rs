//! IP-based position lookup against a mock server.

use weathercard_core::{Geolocator, IpGeolocator, WeatherError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ip_lookup_returns_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Warsaw",
            "latitude": 52.2298,
            "longitude": 21.0118
        })))
        .mount(&mock_server)
        .await;

    let locator = IpGeolocator::new(format!("{}/json/", mock_server.uri()));
    let coords = locator.current_position().await.unwrap();

    assert_eq!(coords.latitude, 52.2298);
    assert_eq!(coords.longitude, 21.0118);
}

#[tokio::test]
async fn test_ip_lookup_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .mount(&mock_server)
        .await;

    let locator = IpGeolocator::new(format!("{}/json/", mock_server.uri()));
    let err = locator.current_position().await.unwrap_err();

    assert!(matches!(err, WeatherError::Location(ref reason) if reason == "RateLimited"));
}

#[tokio::test]
async fn test_ip_lookup_missing_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": "127.0.0.1" })))
        .mount(&mock_server)
        .await;

    let locator = IpGeolocator::new(format!("{}/json/", mock_server.uri()));
    let err = locator.current_position().await.unwrap_err();

    assert!(matches!(err, WeatherError::Location(_)));
}

#[tokio::test]
async fn test_ip_lookup_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let locator = IpGeolocator::new(format!("{}/json/", mock_server.uri()));
    let err = locator.current_position().await.unwrap_err();

    assert!(err.to_string().contains("503"));
}
