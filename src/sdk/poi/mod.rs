pub mod aggregate;
pub mod classify;
pub mod dedup;
pub mod error;
pub mod mock;
pub mod provider;
pub mod types;

pub use aggregate::{plan_search, PoiAggregator, SearchPlan};
pub use dedup::{dedup_pois, DedupKey};
pub use error::{PipelineError, PoiError};
pub use provider::{OpenChargeMapProvider, PoiProvider, PoiQuery, TomTomProvider};
pub use types::{Poi, PoiSource, PoiType, SearchCategory};
