use super::coord::Coord;

pub const DEFAULT_SAMPLE_POINTS: usize = 6;

/// Picks search points along a route: always the first and last coordinate,
/// plus evenly strided points in between.
///
/// The stride is `max(1, total / (num_points - 2))`, so long geometries can
/// yield a few more points than requested. Asking for two points gives just
/// the endpoints; asking for fewer keeps every point. Geometries shorter
/// than two points yield nothing.
pub fn sample_route(geometry: &[Coord], num_points: usize) -> Vec<Coord> {
    let total = geometry.len();
    if total < 2 {
        return Vec::new();
    }

    let mut points = vec![geometry[0]];

    let step = match num_points {
        2 => None,
        0 | 1 => Some(1),
        n => Some((total / (n - 2)).max(1)),
    };
    if let Some(step) = step.filter(|_| total > 2) {
        points.extend(geometry[..total - 1].iter().skip(step).step_by(step).copied());
    }

    points.push(geometry[total - 1]);
    points
}
