use super::coord::{Coord, DEFAULT_CENTER};
use super::service::RoutingProvider;
use serde::Serialize;

/// Number of suggestions returned by an interactive place search.
pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub id: String,
    pub name: String,
    pub center: Coord,
}

/// Resolves a place name, falling back to [`DEFAULT_CENTER`] when the
/// geocoder fails or finds nothing.
pub async fn geocode_or_default(provider: &dyn RoutingProvider, place: &str) -> Coord {
    match provider.geocode(place).await {
        Ok(coord) => coord,
        Err(err) => {
            log::warn!(
                "Geocoding failed for \"{}\": {}. Using default centre {:?}",
                place,
                err,
                DEFAULT_CENTER
            );
            DEFAULT_CENTER
        }
    }
}

/// Place search that degrades to an empty suggestion list on failure.
pub async fn search_or_empty(provider: &dyn RoutingProvider, query: &str) -> Vec<PlaceSuggestion> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    match provider.search_places(query, SEARCH_LIMIT).await {
        Ok(places) => places,
        Err(err) => {
            log::error!("Search error for \"{}\": {}", query, err);
            Vec::new()
        }
    }
}
