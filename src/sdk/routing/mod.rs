pub mod coord;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod route;
pub mod sampler;
pub mod service;

pub use coord::{validate_coord, Coord, DEFAULT_CENTER};
pub use error::RoutingError;
pub use geocode::{geocode_or_default, search_or_empty, PlaceSuggestion};
pub use provider::MapboxProvider;
pub use route::{calculate_route, Directions, RouteResult, RouteSource};
pub use sampler::{sample_route, DEFAULT_SAMPLE_POINTS};
pub use service::RoutingProvider;
