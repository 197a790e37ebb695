//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - The full search pipeline against mocked Overpass and Nominatim servers
//! - Port adapters over real HTTP clients
//! - Backend health probes

use std::sync::Arc;

use application::ports::{GeoQueryPort, ReverseGeocoderPort};
use application::services::SearchOutcome;
use domain::{Department, GeoLocation, SearchRequest};
use infrastructure::{AppConfig, OverpassAdapter, ReverseGeocoderAdapter, build_department_finder};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for_mock(server_uri: &str) -> AppConfig {
    let mut config = AppConfig::for_testing();
    config.overpass.base_url = format!("{server_uri}/api/interpreter");
    config.geocoding.nominatim_base_url = server_uri.to_string();
    config.geocoding.photon_base_url = server_uri.to_string();
    config
}

fn center() -> GeoLocation {
    GeoLocation::new(48.2, 16.3).unwrap()
}

const fn ambulance_elements_json() -> &'static str {
    r#"{
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 200,
                "lat": 48.21,
                "lon": 16.31,
                "tags": {"amenity": "hospital", "name": "Klinik Ottakring"}
            },
            {
                "type": "node",
                "id": 100,
                "lat": 48.205,
                "lon": 16.3,
                "tags": {
                    "emergency": "ambulance_station",
                    "name": "Rettungsstation West",
                    "addr:street": "Thaliastraße",
                    "addr:housenumber": "12",
                    "addr:postcode": "1160",
                    "addr:city": "Wien",
                    "phone": "+43 1 144"
                }
            }
        ]
    }"#
}

const fn nominatim_json() -> &'static str {
    r#"{
        "place_id": 7,
        "address": {
            "road": "Montleartstraße",
            "house_number": "37",
            "postcode": "1160",
            "city": "Wien",
            "country": "Österreich"
        }
    }"#
}

// ============================================================================
// Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn finds_and_resolves_sorted_facilities() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(body_string_contains("around%3A2000%2C"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ambulance_elements_json()))
            .expect(1)
            .mount(&server)
            .await;

        // Only the hospital lacks inline address tags
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "48.21"))
            .and(query_param("lon", "16.31"))
            .respond_with(ResponseTemplate::new(200).set_body_string(nominatim_json()))
            .expect(1)
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let locations = finder
            .find(48.2, 16.3, Department::Ambulance, None, None)
            .await
            .unwrap();

        assert_eq!(locations.len(), 2);

        let station = &locations[0];
        assert_eq!(station.id, 100);
        assert_eq!(station.name, "Rettungsstation West");
        assert_eq!(station.address, "Thaliastraße 12, 1160 Wien");
        assert_eq!(station.phone.as_deref(), Some("+43 1 144"));

        let hospital = &locations[1];
        assert_eq!(hospital.id, 200);
        assert_eq!(hospital.address, "Montleartstraße 37, 1160 Wien");
        assert!(station.distance.unwrap() < hospital.distance.unwrap());
    }

    #[tokio::test]
    async fn expands_radius_until_exhausted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"elements": []}"#))
            .expect(3)
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let request = SearchRequest::new(48.2, 16.3, Department::Police)
            .unwrap()
            .with_max_radius(6_000)
            .with_step(2_000);

        let outcome = finder.search(&request).await.unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[tokio::test]
    async fn later_radius_hit_stops_expansion() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(body_string_contains("around%3A2000%2C"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"elements": []}"#))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(body_string_contains("around%3A4000%2C"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"elements": [{"id": 5, "lat": 48.23, "lon": 16.3,
                    "tags": {"amenity": "fire_station", "addr:street": "Hauptstraße"}}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let locations = finder
            .find(48.2, 16.3, Department::Fire, Some(20_000), Some(2_000))
            .await
            .unwrap();

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Unbenannt");
        assert_eq!(locations[0].address, "Hauptstraße ,  ");
    }

    #[tokio::test]
    async fn overpass_failure_aborts_search() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(504))
            // One query per search: `search` and `find_request` each stop at the first failure
            .expect(2)
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let request = SearchRequest::new(48.2, 16.3, Department::Police).unwrap();

        let outcome = finder.search(&request).await.unwrap();
        assert!(matches!(outcome, SearchOutcome::NetworkError(_)));
        assert!(finder.find_request(&request).await.is_none());
    }

    #[tokio::test]
    async fn geocoder_failure_keeps_location_with_blank_address() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"elements": [{"id": 9, "lat": 48.201, "lon": 16.301,
                    "tags": {"amenity": "police", "name": "PI Hernals"}}]}"#,
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let locations = finder
            .find(48.2, 16.3, Department::Police, None, None)
            .await
            .unwrap();

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "PI Hernals");
        assert_eq!(locations[0].address, " ,  ");
        assert_eq!(locations[0].street, "");
    }

    #[tokio::test]
    async fn reports_backend_health() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Connected as: 1"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let finder = build_department_finder(&config_for_mock(&server.uri())).unwrap();
        let status = finder.check_backends().await;

        assert!(status.spatial);
        assert!(!status.geocoder);
        assert_eq!(status.geocoder_provider, "nominatim");
    }
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;
    use application::error::ApplicationError;
    use integration_geocoding::ProviderKind;

    #[tokio::test]
    async fn overpass_adapter_drops_malformed_elements() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"elements": [
                    {"id": 1, "lat": 48.2, "lon": 16.3, "tags": {"amenity": "police"}},
                    {"id": 2, "lat": "north", "lon": 16.3},
                    {"lat": 48.2, "lon": 16.3}
                ]}"#,
            ))
            .mount(&server)
            .await;

        let config = config_for_mock(&server.uri());
        let adapter = OverpassAdapter::new(&config.overpass).unwrap();
        let candidates = adapter.query(center(), Department::Police, 2000).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, 1);
    }

    #[tokio::test]
    async fn overpass_adapter_maps_bad_json_to_network_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let config = config_for_mock(&server.uri());
        let adapter: Arc<dyn GeoQueryPort> = Arc::new(OverpassAdapter::new(&config.overpass).unwrap());
        let err = adapter.query(center(), Department::Fire, 2000).await.unwrap_err();

        assert!(matches!(err, ApplicationError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn photon_adapter_resolves_address() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "48.2"))
            .and(query_param("lon", "16.3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"features": [{"properties": {
                    "street": "Hernalser Hauptstraße", "housenumber": "44",
                    "postcode": "1170", "city": "Wien", "country": "Österreich"
                }}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for_mock(&server.uri());
        config.geocoding.provider = ProviderKind::Photon;
        let adapter = ReverseGeocoderAdapter::new(&config.geocoding).unwrap();

        let address = adapter.reverse_geocode(center()).await.unwrap();
        assert_eq!(adapter.provider_name(), "photon");
        assert_eq!(address.street.as_deref(), Some("Hernalser Hauptstraße"));
        assert_eq!(address.house.as_deref(), Some("44"));
        assert_eq!(address.city.as_deref(), Some("Wien"));
    }

    #[tokio::test]
    async fn unreachable_geocoder_yields_none() {
        let mut config = AppConfig::for_testing();
        config.geocoding.nominatim_base_url = "http://127.0.0.1:1".to_string();
        let adapter = ReverseGeocoderAdapter::new(&config.geocoding).unwrap();

        assert!(adapter.reverse_geocode(center()).await.is_none());
        assert!(!adapter.is_available().await);
    }
}
