use super::types::OcmStation;
use super::{PoiProvider, PoiQuery};
use crate::sdk::http::CachedClient;
use crate::sdk::poi::error::PoiError;
use crate::sdk::poi::types::{Poi, PoiSource, PoiType};
use crate::sdk::util::rate_limit::{ProviderGate, OPEN_CHARGE_MAP_PER_MINUTE};
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

pub const OPEN_CHARGE_MAP_BASE_URL: &str = "https://api.openchargemap.io";
const MAX_RESULTS: u32 = 50;

/// EV charging stations from the OpenChargeMap API.
pub struct OpenChargeMapProvider {
    client: CachedClient,
    api_key: Option<String>,
    base_url: String,
    gate: ProviderGate,
}

impl OpenChargeMapProvider {
    pub fn new(client: CachedClient, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, OPEN_CHARGE_MAP_BASE_URL.to_string())
    }

    pub fn with_base_url(client: CachedClient, api_key: Option<String>, base_url: String) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url,
            gate: ProviderGate::new("openchargemap", OPEN_CHARGE_MAP_PER_MINUTE),
        }
    }

    /// Replaces the default per-minute gate.
    pub fn with_gate(mut self, gate: ProviderGate) -> Self {
        self.gate = gate;
        self
    }
}

#[async_trait]
impl PoiProvider for OpenChargeMapProvider {
    fn name(&self) -> &'static str {
        "OpenChargeMap"
    }

    async fn fetch_pois(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("OpenChargeMap API key missing; skipping EV station lookup");
            return Ok(Vec::new());
        };

        let mut url = Url::parse(&self.base_url)?.join("v3/poi/")?;
        url.query_pairs_mut()
            .append_pair("output", "json")
            .append_pair("latitude", &query.latitude.to_string())
            .append_pair("longitude", &query.longitude.to_string())
            .append_pair("distance", &query.radius_km.to_string())
            .append_pair("distanceunit", "km")
            .append_pair("maxresults", &MAX_RESULTS.to_string());

        let cache_key = format!(
            "ev-stations-{}-{}-{}",
            query.latitude, query.longitude, query.radius_km
        );
        let request = self
            .client
            .http()
            .get(url)
            .header("X-API-Key", api_key)
            .build()?;

        log::debug!("[PROVIDER] OpenChargeMap lookup {}", cache_key);
        let response = self
            .client
            .fetch_gated(request, &cache_key, &self.gate)
            .await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("OpenChargeMap API rate limit exceeded");
            return Ok(Vec::new());
        }
        if !response.is_success() {
            return Err(PoiError::Status {
                provider: self.name(),
                status: response.status.as_u16(),
            });
        }

        let stations: Vec<OcmStation> = response.json().map_err(|source| PoiError::Parse {
            provider: self.name(),
            source,
        })?;

        Ok(stations.into_iter().filter_map(station_to_poi).collect())
    }
}

fn station_to_poi(station: OcmStation) -> Option<Poi> {
    let info = station.address_info.unwrap_or_default();
    let (Some(latitude), Some(longitude)) = (info.latitude, info.longitude) else {
        log::debug!("Skipping OpenChargeMap station {:?} without coordinates", station.id);
        return None;
    };

    let address = [
        info.address_line1,
        info.town,
        info.state_or_province,
        info.postcode,
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let connectors = station
        .connections
        .unwrap_or_default()
        .into_iter()
        .filter_map(|conn| conn.connection_type.and_then(|t| t.title))
        .filter(|title| !title.is_empty())
        .collect();

    let poi = Poi {
        id: match station.id {
            Some(id) => format!("ocm-{}", id),
            None => "ocm-unknown".to_string(),
        },
        name: info
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown Station".to_string()),
        poi_type: PoiType::EvStation,
        latitude,
        longitude,
        address,
        connectors: Some(connectors),
        status: Some(
            station
                .status_type
                .and_then(|s| s.title)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        ),
        source: PoiSource::OpenChargeMap,
    };

    poi.has_valid_position().then_some(poi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_station_with_defaults() {
        let raw = r#"[
            {
                "ID": 123,
                "AddressInfo": {
                    "Title": "Depot Chargers",
                    "Latitude": 40.71,
                    "Longitude": -74.0,
                    "AddressLine1": "1 Main St",
                    "Town": "New York",
                    "StateOrProvince": null,
                    "Postcode": "10001"
                },
                "Connections": [
                    {"ConnectionType": {"Title": "CCS (Type 1)"}},
                    {"ConnectionType": null},
                    {"ConnectionType": {"Title": "CHAdeMO"}}
                ],
                "StatusType": {"Title": "Operational"}
            },
            {
                "ID": 124,
                "AddressInfo": {"Latitude": 40.8, "Longitude": -73.9},
                "Connections": null
            },
            {
                "ID": 125,
                "AddressInfo": {"Title": "Nowhere"}
            }
        ]"#;

        let stations: Vec<OcmStation> = serde_json::from_str(raw).unwrap();
        let pois: Vec<Poi> = stations.into_iter().filter_map(station_to_poi).collect();
        assert_eq!(pois.len(), 2);

        assert_eq!(pois[0].id, "ocm-123");
        assert_eq!(pois[0].address, "1 Main St, New York, 10001");
        assert_eq!(
            pois[0].connectors.as_deref(),
            Some(&["CCS (Type 1)".to_string(), "CHAdeMO".to_string()][..])
        );
        assert_eq!(pois[0].status.as_deref(), Some("Operational"));

        assert_eq!(pois[1].name, "Unknown Station");
        assert_eq!(pois[1].address, "");
        assert_eq!(pois[1].connectors, Some(Vec::new()));
        assert_eq!(pois[1].status.as_deref(), Some("Unknown"));
        assert_eq!(pois[1].source, PoiSource::OpenChargeMap);
    }
}
