use super::error::RoutingError;

/// A `(longitude, latitude)` pair in degrees, GeoJSON order.
pub type Coord = (f64, f64);

/// Fallback centre when a place name cannot be resolved (New York City).
pub const DEFAULT_CENTER: Coord = (-74.006, 40.7128);

pub fn is_valid_coord(coord: Coord) -> bool {
    let (lng, lat) = coord;
    lng.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lng)
        && (-90.0..=90.0).contains(&lat)
}

pub fn validate_coord(coord: Coord) -> Result<Coord, RoutingError> {
    if is_valid_coord(coord) {
        Ok(coord)
    } else {
        Err(RoutingError::InvalidCoordinate {
            lng: coord.0,
            lat: coord.1,
        })
    }
}

/// Formats a coordinate as `lng,lat` with six decimals.
pub fn format_coord(coord: Coord) -> String {
    format!("{:.6},{:.6}", coord.0, coord.1)
}
