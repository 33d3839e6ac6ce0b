use super::types::{Poi, PoiSource, PoiType};
use crate::sdk::routing::coord::Coord;
use rand::Rng;

const JITTER_DEG: f64 = 0.01;

fn template() -> Vec<Poi> {
    let place = |id: &str, name: &str, poi_type: PoiType, address: &str| Poi {
        id: id.to_string(),
        name: name.to_string(),
        poi_type,
        latitude: 0.0,
        longitude: 0.0,
        address: address.to_string(),
        connectors: None,
        status: None,
        source: PoiSource::Mock,
    };

    let mut hub = place("1", "Downtown EV Charging Hub", PoiType::EvStation, "123 Main St, New York, NY");
    hub.connectors = Some(vec!["CCS".into(), "CHAdeMO".into(), "Type 2".into()]);
    hub.status = Some("Available".into());

    vec![
        hub,
        place("2", "City Hospital", PoiType::Hospital, "456 Health Ave, New York, NY"),
        place("3", "Green Leaf Restaurant", PoiType::Restaurant, "789 Food St, New York, NY"),
        place("4", "Central Gas Station", PoiType::PetrolStation, "321 Fuel Rd, New York, NY"),
    ]
}

/// Placeholder POIs scattered within ±0.01° of `near`, served when the real
/// pipeline could not produce anything.
pub fn fallback_pois(near: Coord) -> Vec<Poi> {
    let mut rng = rand::thread_rng();
    template()
        .into_iter()
        .map(|mut poi| {
            poi.latitude = (near.1 + rng.gen_range(-JITTER_DEG..JITTER_DEG)).clamp(-90.0, 90.0);
            poi.longitude = (near.0 + rng.gen_range(-JITTER_DEG..JITTER_DEG)).clamp(-180.0, 180.0);
            poi
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_jittered_around_the_start() {
        let near = (-74.006, 40.7128);
        let pois = fallback_pois(near);
        assert_eq!(pois.len(), 4);
        for poi in &pois {
            assert_eq!(poi.source, PoiSource::Mock);
            assert!((poi.latitude - near.1).abs() <= JITTER_DEG);
            assert!((poi.longitude - near.0).abs() <= JITTER_DEG);
        }
        assert!(pois[0].is_ev_station());
        assert_eq!(pois[0].connectors.as_ref().map(Vec::len), Some(3));
    }
}
