use super::types::{DirectionsResponse, GeoResponse};
use crate::sdk::http::{CachedClient, CachedResponse};
use crate::sdk::routing::coord::{format_coord, Coord};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::PlaceSuggestion;
use crate::sdk::routing::route::Directions;
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{ProviderGate, MAPBOX_PER_MINUTE};
use async_trait::async_trait;
use url::Url;

pub const MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

/// Geocoding and directions backed by the Mapbox REST APIs.
pub struct MapboxProvider {
    client: CachedClient,
    token: Option<String>,
    base_url: String,
    gate: ProviderGate,
}

impl MapboxProvider {
    pub fn new(client: CachedClient, token: Option<String>) -> Self {
        Self::with_base_url(client, token, MAPBOX_BASE_URL.to_string())
    }

    pub fn with_base_url(client: CachedClient, token: Option<String>, base_url: String) -> Self {
        Self {
            client,
            token,
            base_url,
            gate: ProviderGate::new("mapbox", MAPBOX_PER_MINUTE),
        }
    }

    fn token(&self) -> Result<&str, RoutingError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(RoutingError::MissingToken)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RoutingError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, url: Url, cache_key: &str) -> Result<CachedResponse, RoutingError> {
        let request = self.client.http().get(url).build()?;
        let response = self
            .client
            .fetch_gated(request, cache_key, &self.gate)
            .await?;

        if !response.is_success() {
            log::error!(
                "Mapbox API returned non-success status: {}. Body: {}",
                response.status,
                response.body
            );
            return Err(RoutingError::from_api_body(
                response.status.as_u16(),
                &response.body,
            ));
        }
        Ok(response)
    }

    async fn lookup_places(&self, query: &str, limit: Option<usize>) -> Result<GeoResponse, RoutingError> {
        let token = self.token()?;
        let file = format!("{}.json", query);
        let mut url = self.endpoint(&["geocoding", "v5", "mapbox.places", &file])?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("access_token", token);
            if let Some(limit) = limit {
                params.append_pair("limit", &limit.to_string());
            }
        }

        let cache_key = match limit {
            Some(limit) => format!("geocode-{}-{}", query, limit),
            None => format!("geocode-{}", query),
        };
        let response = self.send(url, &cache_key).await?;
        response.json::<GeoResponse>().map_err(|e| {
            log::error!("Failed to parse GeoResponse for \"{}\": {}", query, e);
            RoutingError::ParseError(e)
        })
    }
}

#[async_trait]
impl RoutingProvider for MapboxProvider {
    async fn geocode(&self, place: &str) -> Result<Coord, RoutingError> {
        log::debug!("[PROVIDER] Calling mapbox geocode for: \"{}\"", place);
        let resp = self.lookup_places(place, None).await?;
        let center = resp
            .features
            .first()
            .ok_or_else(|| RoutingError::NoResults(place.to_string()))?
            .center;
        Ok((center[0], center[1]))
    }

    async fn search_places(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, RoutingError> {
        log::debug!("[PROVIDER] Calling mapbox search for: \"{}\"", query);
        let resp = self.lookup_places(query, Some(limit)).await?;
        Ok(resp
            .features
            .into_iter()
            .map(|f| PlaceSuggestion {
                id: f.id,
                name: f.place_name,
                center: (f.center[0], f.center[1]),
            })
            .collect())
    }

    async fn get_directions(&self, start: Coord, end: Coord) -> Result<Directions, RoutingError> {
        let token = self.token()?;
        let formatted_start = format_coord(start);
        let formatted_end = format_coord(end);
        log::debug!(
            "[PROVIDER] Calling mapbox directions for {} -> {}",
            formatted_start,
            formatted_end
        );

        let pair = format!("{};{}", formatted_start, formatted_end);
        let mut url = self.endpoint(&["directions", "v5", "mapbox", "driving", &pair])?;
        url.query_pairs_mut()
            .append_pair("geometries", "geojson")
            .append_pair("overview", "full")
            .append_pair("steps", "true")
            .append_pair("access_token", token);

        let cache_key = format!("route-{}-{}", formatted_start, formatted_end);
        let response = self.send(url, &cache_key).await?;

        let directions: DirectionsResponse = response.json().map_err(|e| {
            log::error!("Failed to parse DirectionsResponse. Error: {}", e);
            RoutingError::ParseError(e)
        })?;

        let route = directions
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute)?;

        Ok(Directions {
            geometry: route
                .geometry
                .coordinates
                .into_iter()
                .map(|c| (c[0], c[1]))
                .collect(),
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
