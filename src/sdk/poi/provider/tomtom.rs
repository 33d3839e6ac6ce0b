use super::types::{TomTomResponse, TomTomResult};
use super::{PoiProvider, PoiQuery};
use crate::sdk::http::CachedClient;
use crate::sdk::poi::classify::classify;
use crate::sdk::poi::error::PoiError;
use crate::sdk::poi::types::{Poi, PoiSource, SearchCategory};
use crate::sdk::util::rate_limit::{ProviderGate, TOMTOM_PER_MINUTE};
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

pub const TOMTOM_BASE_URL: &str = "https://api.tomtom.com";
const RESULT_LIMIT: u32 = 20;

/// Hospitals, restaurants, fuel and charging stations from TomTom's
/// category search.
pub struct TomTomProvider {
    client: CachedClient,
    api_key: Option<String>,
    base_url: String,
    gate: ProviderGate,
}

impl TomTomProvider {
    pub fn new(client: CachedClient, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, TOMTOM_BASE_URL.to_string())
    }

    pub fn with_base_url(client: CachedClient, api_key: Option<String>, base_url: String) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url,
            gate: ProviderGate::new("tomtom", TOMTOM_PER_MINUTE),
        }
    }

    fn endpoint(&self, category: SearchCategory) -> Result<Url, PoiError> {
        let mut url = Url::parse(&self.base_url)?;
        let file = format!("{}.json", category.query());
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["search", "2", "categorySearch", file.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl PoiProvider for TomTomProvider {
    fn name(&self) -> &'static str {
        "TomTom"
    }

    async fn fetch_pois(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!(
                "TomTom API key missing; skipping {} lookup",
                query.category.query()
            );
            return Ok(Vec::new());
        };

        let radius_m = (query.radius_km * 1000.0).round() as u64;
        let mut url = self.endpoint(query.category)?;
        url.query_pairs_mut()
            .append_pair("lat", &query.latitude.to_string())
            .append_pair("lon", &query.longitude.to_string())
            .append_pair("radius", &radius_m.to_string())
            .append_pair("limit", &RESULT_LIMIT.to_string())
            .append_pair("key", api_key);

        let cache_key = format!(
            "tomtom-{}-{}-{}-{}",
            query.category.query(),
            query.latitude,
            query.longitude,
            radius_m
        );
        let request = self.client.http().get(url).build()?;

        log::debug!("[PROVIDER] TomTom lookup {}", cache_key);
        let response = self
            .client
            .fetch_gated(request, &cache_key, &self.gate)
            .await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("TomTom API rate limit exceeded for {}", query.category.query());
            return Ok(Vec::new());
        }
        if !response.is_success() {
            return Err(PoiError::Status {
                provider: self.name(),
                status: response.status.as_u16(),
            });
        }

        let data: TomTomResponse = response.json().map_err(|source| PoiError::Parse {
            provider: self.name(),
            source,
        })?;

        Ok(data
            .results
            .into_iter()
            .filter_map(|result| result_to_poi(result, query.category))
            .collect())
    }
}

fn result_to_poi(result: TomTomResult, searched: SearchCategory) -> Option<Poi> {
    let details = result.poi.unwrap_or_default();
    let poi_type = classify(details.categories.first().map(String::as_str), Some(searched));

    let poi = Poi {
        id: format!("tomtom-{}", result.id),
        name: details
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown Location".to_string()),
        poi_type,
        latitude: result.position.lat,
        longitude: result.position.lon,
        address: result
            .address
            .and_then(|a| a.freeform_address)
            .unwrap_or_default(),
        connectors: None,
        status: None,
        source: PoiSource::TomTom,
    };

    if poi.has_valid_position() {
        Some(poi)
    } else {
        log::debug!("Skipping TomTom result {} with invalid position", poi.id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::poi::types::PoiType;

    #[test]
    fn maps_results_and_classifies() {
        let raw = r#"{
            "results": [
                {
                    "id": "abc",
                    "poi": {"name": "St. Mary", "categories": ["hospital"]},
                    "position": {"lat": 40.71, "lon": -74.0},
                    "address": {"freeformAddress": "1 Health Ave"}
                },
                {
                    "id": "def",
                    "poi": {"categories": ["parking"]},
                    "position": {"lat": 40.72, "lon": -74.01}
                },
                {
                    "id": "bad",
                    "poi": {"name": "Off the map"},
                    "position": {"lat": 123.0, "lon": 0.0}
                }
            ]
        }"#;

        let data: TomTomResponse = serde_json::from_str(raw).unwrap();
        let pois: Vec<Poi> = data
            .results
            .into_iter()
            .filter_map(|r| result_to_poi(r, SearchCategory::Restaurant))
            .collect();

        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].id, "tomtom-abc");
        assert_eq!(pois[0].poi_type, PoiType::Hospital);
        assert_eq!(pois[0].address, "1 Health Ave");

        assert_eq!(pois[1].name, "Unknown Location");
        assert_eq!(pois[1].poi_type, PoiType::Restaurant);
        assert_eq!(pois[1].address, "");
        assert_eq!(pois[1].source, PoiSource::TomTom);
    }
}
