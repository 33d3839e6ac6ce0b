use super::types::Poi;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Identity used to spot the same place reported by several providers:
/// trimmed lower-case name plus coordinates rounded to 4 decimals (~11 m).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    name: String,
    lat_e4: i64,
    lng_e4: i64,
}

impl DedupKey {
    pub fn of(poi: &Poi) -> Self {
        Self {
            name: poi.name.trim().to_lowercase(),
            lat_e4: round_e4(poi.latitude),
            lng_e4: round_e4(poi.longitude),
        }
    }
}

fn round_e4(value: f64) -> i64 {
    round_half_up(value * 10_000.0)
}

/// Halves round towards positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(scaled: f64) -> i64 {
    (scaled + 0.5).floor() as i64
}

/// `Less` when `candidate` should replace `current`: ev-station records
/// first, then by source priority. Ties keep the record seen first.
fn rank(candidate: &Poi, current: &Poi) -> Ordering {
    current
        .is_ev_station()
        .cmp(&candidate.is_ev_station())
        .then_with(|| candidate.source.priority().cmp(&current.source.priority()))
}

/// Collapses POIs that share a [`DedupKey`], keeping the best-ranked record
/// of each group in the position where the group first appeared.
pub fn dedup_pois(pois: Vec<Poi>) -> Vec<Poi> {
    let mut slots: HashMap<DedupKey, usize> = HashMap::with_capacity(pois.len());
    let mut unique: Vec<Poi> = Vec::with_capacity(pois.len());

    for poi in pois {
        match slots.get(&DedupKey::of(&poi)) {
            Some(&idx) => {
                if rank(&poi, &unique[idx]) == Ordering::Less {
                    unique[idx] = poi;
                }
            }
            None => {
                slots.insert(DedupKey::of(&poi), unique.len());
                unique.push(poi);
            }
        }
    }

    unique
}
