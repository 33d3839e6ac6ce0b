use crate::sdk::poi::types::{Poi, PoiType};
use crate::sdk::routing::coord::Coord;
use serde::Serialize;

pub const START_COLOR: &str = "#22c55e";
pub const END_COLOR: &str = "#ef4444";
const FALLBACK_COLOR: &str = "#9ca3af";

pub const INITIAL_ZOOM: f64 = 12.0;
pub const FOCUS_ZOOM: f64 = 14.0;

pub fn color_for(poi_type: PoiType) -> &'static str {
    match poi_type {
        PoiType::EvStation => "#22c55e",
        PoiType::Hospital => "#ef4444",
        PoiType::Restaurant => "#f59e0b",
        PoiType::PetrolStation => "#3b82f6",
        PoiType::Other => FALLBACK_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub directions_url: String,
    pub favorite_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiMarker {
    pub poi_id: String,
    pub poi_type: PoiType,
    pub position: Coord,
    pub color: &'static str,
    pub favorite: bool,
    pub popup: Popup,
}

impl PoiMarker {
    pub fn new(poi: &Poi, favorite: bool) -> Self {
        let connectors = match (&poi.poi_type, &poi.connectors) {
            (PoiType::EvStation, Some(list)) => Some(list.join(", ")),
            _ => None,
        };
        Self {
            poi_id: poi.id.clone(),
            poi_type: poi.poi_type,
            position: poi.coord(),
            color: color_for(poi.poi_type),
            favorite,
            popup: Popup {
                title: poi.name.clone(),
                address: poi.address.clone(),
                connectors,
                status: poi.status.clone(),
                directions_url: directions_url(poi),
                favorite_label: if favorite { "Unfavorite" } else { "Favorite" },
            },
        }
    }
}

/// Start or end pin of the current search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorMarker {
    pub label: String,
    pub position: Coord,
    pub color: &'static str,
}

impl AnchorMarker {
    pub fn start(location: &str, position: Coord) -> Self {
        Self {
            label: format!("Start: {}", location),
            position,
            color: START_COLOR,
        }
    }

    pub fn end(location: &str, position: Coord) -> Self {
        Self {
            label: format!("End: {}", location),
            position,
            color: END_COLOR,
        }
    }
}

pub fn directions_url(poi: &Poi) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        poi.latitude, poi.longitude
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coord,
    pub north_east: Coord,
}

impl Bounds {
    pub fn around(points: &[Coord]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Bounds {
            south_west: *first,
            north_east: *first,
        };
        Some(rest.iter().fold(init, |b, &(lng, lat)| Bounds {
            south_west: (b.south_west.0.min(lng), b.south_west.1.min(lat)),
            north_east: (b.north_east.0.max(lng), b.north_east.1.max(lat)),
        }))
    }

    pub fn center(&self) -> Coord {
        (
            (self.south_west.0 + self.north_east.0) / 2.0,
            (self.south_west.1 + self.north_east.1) / 2.0,
        )
    }
}

/// What the map is looking at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coord,
    pub zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<Bounds>,
}

impl Viewport {
    pub fn centered(center: Coord, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            fit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::poi::types::PoiSource;

    #[test]
    fn ev_popup_lists_connectors_and_status() {
        let poi = Poi {
            id: "ocm-1".into(),
            name: "Depot".into(),
            poi_type: PoiType::EvStation,
            latitude: 40.5,
            longitude: -74.25,
            address: "1 Main St".into(),
            connectors: Some(vec!["CCS".into(), "Type 2".into()]),
            status: Some("Available".into()),
            source: PoiSource::OpenChargeMap,
        };
        let marker = PoiMarker::new(&poi, true);
        assert_eq!(marker.color, "#22c55e");
        assert_eq!(marker.popup.connectors.as_deref(), Some("CCS, Type 2"));
        assert_eq!(marker.popup.favorite_label, "Unfavorite");
        assert_eq!(
            marker.popup.directions_url,
            "https://www.google.com/maps/dir/?api=1&destination=40.5,-74.25"
        );
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::around(&[(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)]).unwrap();
        assert_eq!(b.south_west, (-2.0, -1.0));
        assert_eq!(b.north_east, (4.0, 5.0));
        assert_eq!(b.center(), (1.0, 2.0));
        assert!(Bounds::around(&[]).is_none());
    }
}
