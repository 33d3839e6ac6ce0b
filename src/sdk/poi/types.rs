use crate::sdk::routing::coord::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoiType {
    EvStation,
    Hospital,
    Restaurant,
    PetrolStation,
    #[serde(other)]
    Other,
}

impl PoiType {
    /// Types the map can display, in legend order.
    pub const DISPLAYABLE: [PoiType; 4] = [
        PoiType::EvStation,
        PoiType::Hospital,
        PoiType::Restaurant,
        PoiType::PetrolStation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoiType::EvStation => "ev-station",
            PoiType::Hospital => "hospital",
            PoiType::Restaurant => "restaurant",
            PoiType::PetrolStation => "petrol-station",
            PoiType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ev-station" | "ev" | "charging" => Some(PoiType::EvStation),
            "hospital" => Some(PoiType::Hospital),
            "restaurant" => Some(PoiType::Restaurant),
            "petrol-station" | "petrol" | "fuel" => Some(PoiType::PetrolStation),
            "other" => Some(PoiType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PoiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiSource {
    OpenChargeMap,
    TomTom,
    Mock,
}

impl PoiSource {
    /// Lower ranks win when two sources describe the same place.
    pub fn priority(&self) -> u8 {
        match self {
            PoiSource::OpenChargeMap => 0,
            PoiSource::TomTom => 1,
            PoiSource::Mock => 2,
        }
    }
}

/// A named, geolocated place returned by one of the POI providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub poi_type: PoiType,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default = "default_source")]
    pub source: PoiSource,
}

fn default_source() -> PoiSource {
    PoiSource::Mock
}

impl Poi {
    pub fn coord(&self) -> Coord {
        (self.longitude, self.latitude)
    }

    pub fn is_ev_station(&self) -> bool {
        self.poi_type == PoiType::EvStation
    }

    pub fn has_valid_position(&self) -> bool {
        crate::sdk::routing::coord::is_valid_coord(self.coord())
    }
}

/// Category queried on the generic POI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCategory {
    ChargingStation,
    Hospital,
    Restaurant,
    PetrolStation,
}

impl SearchCategory {
    /// Generic-provider queries issued per search point, in order.
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::ChargingStation,
        SearchCategory::Hospital,
        SearchCategory::Restaurant,
        SearchCategory::PetrolStation,
    ];

    pub fn query(&self) -> &'static str {
        match self {
            SearchCategory::ChargingStation => "charging station",
            SearchCategory::Hospital => "hospital",
            SearchCategory::Restaurant => "restaurant",
            SearchCategory::PetrolStation => "petrol station",
        }
    }

    pub fn poi_type(&self) -> PoiType {
        match self {
            SearchCategory::ChargingStation => PoiType::EvStation,
            SearchCategory::Hospital => PoiType::Hospital,
            SearchCategory::Restaurant => PoiType::Restaurant,
            SearchCategory::PetrolStation => PoiType::PetrolStation,
        }
    }
}
