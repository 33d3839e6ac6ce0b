pub mod mapbox;
pub mod types;

pub use mapbox::MapboxProvider;
