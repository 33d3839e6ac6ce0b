use super::coord::{validate_coord, Coord};
use super::error::RoutingError;
use super::service::RoutingProvider;
use rand::Rng;
use serde::Serialize;

/// Points in a synthetic fallback route, endpoints included.
pub const SYNTHETIC_ROUTE_POINTS: usize = 21;
const SYNTHETIC_JITTER_DEG: f64 = 0.01;
const SYNTHETIC_DISTANCE_METERS: f64 = 10_000.0;

/// Raw directions as returned by a [`RoutingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    pub geometry: Vec<Coord>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Directions,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub geometry: Vec<Coord>,
    pub distance: String,
    pub duration: String,
    pub distance_meters: f64,
    pub source: RouteSource,
}

impl RouteResult {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == RouteSource::Synthetic
    }

    /// Whether some vertex of the geometry is within `tolerance_deg` of
    /// `coord` on both axes.
    pub fn passes_near(&self, coord: Coord, tolerance_deg: f64) -> bool {
        self.geometry.iter().any(|&(lng, lat)| {
            (lng - coord.0).abs() <= tolerance_deg && (lat - coord.1).abs() <= tolerance_deg
        })
    }
}

/// Computes a driving route between two points.
///
/// Invalid coordinates fail before any request is made. Every other failure
/// degrades to a synthetic straight-line route so there is always something
/// to draw.
pub async fn calculate_route(
    provider: &dyn RoutingProvider,
    start: Coord,
    end: Coord,
) -> Result<RouteResult, RoutingError> {
    validate_coord(start).map_err(|err| {
        log::error!("Invalid coordinates passed to calculate_route: {:?} -> {:?}", start, end);
        err
    })?;
    validate_coord(end)?;

    match provider.get_directions(start, end).await {
        Ok(directions) if directions.geometry.len() >= 2 => Ok(RouteResult {
            distance: format_distance(directions.distance_meters),
            duration: format_duration(directions.duration_seconds),
            distance_meters: directions.distance_meters,
            geometry: directions.geometry,
            source: RouteSource::Directions,
        }),
        Ok(_) => {
            log::error!("Error calculating route: directions geometry has fewer than 2 points");
            Ok(synthetic_route(start, end))
        }
        Err(err) => {
            log::error!("Error calculating route: {}", err);
            Ok(synthetic_route(start, end))
        }
    }
}

pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// `"H hr M min"` when at least an hour, otherwise `"M min"`.
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds / 60.0).round().max(0.0) as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Straight line from `start` to `end` with a little jitter per point and a
/// made-up distance and duration.
pub fn synthetic_route(start: Coord, end: Coord) -> RouteResult {
    let mut rng = rand::thread_rng();
    let segments = (SYNTHETIC_ROUTE_POINTS - 1) as f64;

    let geometry = (0..SYNTHETIC_ROUTE_POINTS)
        .map(|i| {
            let ratio = i as f64 / segments;
            let jitter_lng = (rng.gen::<f64>() - 0.5) * SYNTHETIC_JITTER_DEG;
            let jitter_lat = (rng.gen::<f64>() - 0.5) * SYNTHETIC_JITTER_DEG;
            (
                start.0 + (end.0 - start.0) * ratio + jitter_lng,
                start.1 + (end.1 - start.1) * ratio + jitter_lat,
            )
        })
        .collect();

    let distance_km: u32 = rng.gen_range(10..=60);
    let duration_min: u32 = rng.gen_range(30..=90);

    RouteResult {
        geometry,
        distance: format!("{} km", distance_km),
        duration: format!("{} min", duration_min),
        distance_meters: SYNTHETIC_DISTANCE_METERS,
        source: RouteSource::Synthetic,
    }
}
