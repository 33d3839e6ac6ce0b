mod common;

use chargeway::sdk::routing::{
    calculate_route, geocode_or_default, search_or_empty, MapboxProvider, RoutingError,
    RoutingProvider, DEFAULT_CENTER,
};
use serde_json::json;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIRECTIONS_PATH: &str = r"^/directions/v5/mapbox/driving/.+";
const GEOCODING_PATH: &str = r"^/geocoding/v5/mapbox\.places/.+\.json$";

fn mapbox(server: &MockServer) -> MapboxProvider {
    MapboxProvider::with_base_url(common::client(), Some("pk.test".to_string()), server.uri())
}

#[tokio::test]
async fn directions_are_formatted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(DIRECTIONS_PATH))
        .and(query_param("geometries", "geojson"))
        .and(query_param("overview", "full"))
        .and(query_param("access_token", "pk.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::directions_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    let route = calculate_route(&provider, (-74.006, 40.7128), (-74.35, 40.80))
        .await
        .unwrap();

    assert!(!route.is_synthetic());
    assert_eq!(route.distance, "42.3 km");
    assert_eq!(route.duration, "1 hr 2 min");
    assert_eq!(route.geometry.len(), 8);
    assert_eq!(route.geometry[0], (-74.006, 40.7128));
}

#[tokio::test]
async fn invalid_coordinates_fail_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    let err = calculate_route(&provider, (f64::NAN, 40.0), (-74.0, 40.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RoutingError::InvalidCoordinate { .. }));

    let err = calculate_route(&provider, (-74.0, 40.0), (-74.0, 91.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RoutingError::InvalidCoordinate { .. }));
}

#[tokio::test]
async fn upstream_failure_falls_back_to_a_synthetic_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(DIRECTIONS_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Not Authorized - Invalid Token"})),
        )
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    let direct = provider.get_directions((-74.0, 40.7), (-73.9, 40.8)).await.unwrap_err();
    match direct {
        RoutingError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Not Authorized - Invalid Token");
        }
        other => panic!("unexpected error: {other}"),
    }

    let route = calculate_route(&provider, (-74.0, 40.7), (-73.9, 40.8)).await.unwrap();
    assert!(route.is_synthetic());
    assert_eq!(route.geometry.len(), 21);
}

#[tokio::test]
async fn empty_route_list_is_synthetic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(DIRECTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"routes": []})))
        .mount(&server)
        .await;

    let route = calculate_route(&mapbox(&server), (-74.0, 40.7), (-73.9, 40.8))
        .await
        .unwrap();
    assert!(route.is_synthetic());
}

#[tokio::test]
async fn missing_token_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = MapboxProvider::with_base_url(common::client(), None, server.uri());
    assert!(matches!(
        provider.geocode("Boston").await,
        Err(RoutingError::MissingToken)
    ));
    assert_eq!(geocode_or_default(&provider, "Boston").await, DEFAULT_CENTER);
}

#[tokio::test]
async fn geocoding_uses_the_first_feature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                {"id": "place.1", "place_name": "Boston, Massachusetts", "center": [-71.0589, 42.3601]},
                {"id": "place.2", "place_name": "Boston, Lincolnshire", "center": [-0.0266, 52.9765]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    assert_eq!(provider.geocode("Boston").await.unwrap(), (-71.0589, 42.3601));
    // cached under the geocode key
    assert_eq!(geocode_or_default(&provider, "Boston").await, (-71.0589, 42.3601));
}

#[tokio::test]
async fn unknown_place_falls_back_to_default_centre() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    assert!(matches!(
        provider.geocode("Atlantis").await,
        Err(RoutingError::NoResults(_))
    ));
    assert_eq!(geocode_or_default(&provider, "Atlantis").await, DEFAULT_CENTER);
}

#[tokio::test]
async fn search_is_limited_to_five_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(GEOCODING_PATH))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::geocode_body(
            -122.4194,
            37.7749,
            "San Francisco, California",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let provider = mapbox(&server);
    let places = search_or_empty(&provider, "  San Francisco ").await;
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "San Francisco, California");
    assert_eq!(places[0].center, (-122.4194, 37.7749));

    assert!(search_or_empty(&provider, "   ").await.is_empty());
}
