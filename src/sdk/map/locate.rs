use crate::sdk::routing::coord::{is_valid_coord, Coord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device. Please try searching instead.")]
    Unsupported,

    #[error("Could not get your current location. Please try searching instead.")]
    PermissionDenied,

    #[error("Could not get your current location: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Coord, GeolocationError>;
}

/// A locator that reports a position configured up front, e.g. from the
/// command line. With no position it behaves like a device without GPS.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    position: Option<Coord>,
}

impl FixedLocator {
    pub fn new(position: Option<Coord>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coord, GeolocationError> {
        match self.position {
            None => Err(GeolocationError::Unsupported),
            Some(coord) if is_valid_coord(coord) => Ok(coord),
            Some(coord) => Err(GeolocationError::Unavailable(format!(
                "invalid position {:?}",
                coord
            ))),
        }
    }
}

/// Parses `"lng,lat"`.
pub fn parse_position(value: &str) -> Option<Coord> {
    let (lng, lat) = value.split_once(',')?;
    let coord = (lng.trim().parse().ok()?, lat.trim().parse().ok()?);
    is_valid_coord(coord).then_some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lng_lat_pairs() {
        assert_eq!(parse_position("-74.006, 40.7128"), Some((-74.006, 40.7128)));
        assert_eq!(parse_position("200,0"), None);
        assert_eq!(parse_position("abc"), None);
    }

    #[tokio::test]
    async fn fixed_locator_without_position_is_unsupported() {
        let locator = FixedLocator::default();
        assert_eq!(
            locator.current_position().await,
            Err(GeolocationError::Unsupported)
        );
    }
}
