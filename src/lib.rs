pub mod sdk;

pub use sdk::config::Config;
pub use sdk::favorites::FavoriteStore;
pub use sdk::http::{CachedClient, ResponseCache};
pub use sdk::map::{MapController, TypeFilters};
pub use sdk::poi::{Poi, PoiAggregator, PoiType};
pub use sdk::routing::{calculate_route, sample_route, Coord, MapboxProvider, RouteResult};
