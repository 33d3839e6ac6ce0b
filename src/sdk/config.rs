use crate::sdk::favorites::DEFAULT_FAVORITES_FILE;
use crate::sdk::http::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::sdk::poi::provider::openchargemap::OPEN_CHARGE_MAP_BASE_URL;
use crate::sdk::poi::provider::tomtom::TOMTOM_BASE_URL;
use crate::sdk::routing::provider::mapbox::MAPBOX_BASE_URL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Upstream API credentials. Each one is optional: a missing key disables
/// that provider instead of failing startup.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub mapbox_token: Option<String>,
    pub open_charge_map: Option<String>,
    pub tomtom: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub mapbox: String,
    pub open_charge_map: String,
    pub tomtom: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            mapbox: MAPBOX_BASE_URL.to_string(),
            open_charge_map: OPEN_CHARGE_MAP_BASE_URL.to_string(),
            tomtom: TOMTOM_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub keys: ApiKeys,
    pub endpoints: Endpoints,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub favorites_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: ApiKeys::default(),
            endpoints: Endpoints::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            favorites_path: PathBuf::from(DEFAULT_FAVORITES_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let keys = ApiKeys {
            mapbox_token: var("MAPBOX_TOKEN"),
            open_charge_map: var("OPEN_CHARGE_MAP_API_KEY"),
            tomtom: var("TOMTOM_API_KEY"),
        };
        for (name, value) in [
            ("MAPBOX_TOKEN", &keys.mapbox_token),
            ("OPEN_CHARGE_MAP_API_KEY", &keys.open_charge_map),
            ("TOMTOM_API_KEY", &keys.tomtom),
        ] {
            if value.is_none() {
                log::warn!("{} is not set; the matching provider is disabled", name);
            }
        }

        let endpoints = Endpoints {
            mapbox: var("CHARGEWAY_MAPBOX_URL").unwrap_or(defaults.endpoints.mapbox),
            open_charge_map: var("CHARGEWAY_OCM_URL").unwrap_or(defaults.endpoints.open_charge_map),
            tomtom: var("CHARGEWAY_TOMTOM_URL").unwrap_or(defaults.endpoints.tomtom),
        };

        let cache_ttl = match number("CHARGEWAY_CACHE_TTL_SECS")? {
            Some(secs) => Duration::from_secs(secs),
            None => defaults.cache_ttl,
        };
        let cache_capacity = match number("CHARGEWAY_CACHE_CAPACITY")? {
            Some(n) => n as usize,
            None => defaults.cache_capacity,
        };
        let favorites_path = var("CHARGEWAY_FAVORITES")
            .map(PathBuf::from)
            .unwrap_or(defaults.favorites_path);

        Ok(Self {
            keys,
            endpoints,
            cache_ttl,
            cache_capacity,
            favorites_path,
        })
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn number(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match var(name) {
        None => Ok(None),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}
