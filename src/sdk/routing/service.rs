use super::coord::Coord;
use super::error::RoutingError;
use super::geocode::PlaceSuggestion;
use super::route::Directions;
use async_trait::async_trait;

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Geocodes a place name to the centre of its best match.
    async fn geocode(&self, place: &str) -> Result<Coord, RoutingError>;

    /// Returns up to `limit` candidate places for a free-text query.
    async fn search_places(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, RoutingError>;

    /// Gets driving directions between two points.
    async fn get_directions(&self, start: Coord, end: Coord) -> Result<Directions, RoutingError>;
}
