pub mod openchargemap;
pub mod tomtom;
pub mod types;

pub use openchargemap::OpenChargeMapProvider;
pub use tomtom::TomTomProvider;

use super::error::PoiError;
use super::types::{Poi, SearchCategory};
use async_trait::async_trait;

/// One provider call: where to search, how far, and for what.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub category: SearchCategory,
}

#[async_trait]
pub trait PoiProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches POIs around the query point.
    ///
    /// Rate limiting (HTTP 429) and missing credentials yield an empty list;
    /// other upstream failures are errors the caller may choose to swallow.
    async fn fetch_pois(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiError>;
}
