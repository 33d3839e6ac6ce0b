#![allow(dead_code)]

use chargeway::sdk::http::{CachedClient, ResponseCache};
use chargeway::sdk::poi::{OpenChargeMapProvider, PoiAggregator, TomTomProvider};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// A cached client that never pauses between requests.
pub fn client() -> CachedClient {
    CachedClient::new(ResponseCache::default())
        .expect("Failed to build client")
        .with_request_delay(Duration::ZERO, Duration::ZERO)
}

pub fn aggregator(client: &CachedClient, base_url: &str) -> PoiAggregator {
    let ev = OpenChargeMapProvider::with_base_url(
        client.clone(),
        Some("ocm-key".to_string()),
        base_url.to_string(),
    );
    let generic = TomTomProvider::with_base_url(
        client.clone(),
        Some("tomtom-key".to_string()),
        base_url.to_string(),
    );
    PoiAggregator::new(Arc::new(ev), Arc::new(generic))
}

pub fn ocm_stations() -> Value {
    json!([
        {
            "ID": 1001,
            "AddressInfo": {
                "Title": "Hudson Yards Chargers",
                "Latitude": 40.7130,
                "Longitude": -74.0050,
                "AddressLine1": "500 W 33rd St",
                "Town": "New York",
                "StateOrProvince": "NY",
                "Postcode": "10001"
            },
            "Connections": [{"ConnectionType": {"Title": "CCS (Type 1)"}}],
            "StatusType": {"Title": "Operational"}
        },
        {
            "ID": 1002,
            "AddressInfo": {
                "Title": "Battery Park Garage",
                "Latitude": 40.7033,
                "Longitude": -74.0170
            }
        }
    ])
}

/// TomTom results: one duplicate of an OpenChargeMap station (name differs
/// only in case and spacing) and two distinct places.
pub fn tomtom_results() -> Value {
    json!({
        "results": [
            {
                "id": "tt-dup",
                "poi": {"name": "  hudson yards chargers ", "categories": ["electric vehicle charging station"]},
                "position": {"lat": 40.71301, "lon": -74.00501},
                "address": {"freeformAddress": "500 W 33rd St, New York"}
            },
            {
                "id": "tt-hosp",
                "poi": {"name": "Lower Manhattan Hospital", "categories": ["hospital"]},
                "position": {"lat": 40.7100, "lon": -74.0050},
                "address": {"freeformAddress": "170 William St, New York"}
            },
            {
                "id": "tt-food",
                "poi": {"name": "Corner Bistro", "categories": ["restaurant"]},
                "position": {"lat": 40.7140, "lon": -74.0070}
            }
        ]
    })
}

pub fn geocode_body(lng: f64, lat: f64, name: &str) -> Value {
    json!({
        "features": [
            {"id": "place.1", "place_name": name, "center": [lng, lat]}
        ]
    })
}

pub fn directions_body() -> Value {
    json!({
        "routes": [
            {
                "geometry": {
                    "type": "LineString",
                    "coordinates": [
                        [-74.006, 40.7128],
                        [-74.05, 40.73],
                        [-74.10, 40.75],
                        [-74.15, 40.76],
                        [-74.20, 40.77],
                        [-74.25, 40.78],
                        [-74.30, 40.79],
                        [-74.35, 40.80]
                    ]
                },
                "distance": 42300.0,
                "duration": 3725.0
            }
        ]
    })
}
