use crate::sdk::favorites::FavoriteStore;
use crate::sdk::poi::types::{Poi, PoiType};
use serde::Serialize;

/// Which POI types are shown. Only charging stations are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeFilters {
    pub ev_station: bool,
    pub hospital: bool,
    pub restaurant: bool,
    pub petrol_station: bool,
}

impl Default for TypeFilters {
    fn default() -> Self {
        Self {
            ev_station: true,
            hospital: false,
            restaurant: false,
            petrol_station: false,
        }
    }
}

impl TypeFilters {
    pub fn none() -> Self {
        Self {
            ev_station: false,
            hospital: false,
            restaurant: false,
            petrol_station: false,
        }
    }

    pub fn only(types: &[PoiType]) -> Self {
        let mut filters = Self::none();
        for &poi_type in types {
            filters.set(poi_type, true);
        }
        filters
    }

    /// `Other` is never displayed.
    pub fn allows(&self, poi_type: PoiType) -> bool {
        match poi_type {
            PoiType::EvStation => self.ev_station,
            PoiType::Hospital => self.hospital,
            PoiType::Restaurant => self.restaurant,
            PoiType::PetrolStation => self.petrol_station,
            PoiType::Other => false,
        }
    }

    pub fn set(&mut self, poi_type: PoiType, on: bool) {
        match poi_type {
            PoiType::EvStation => self.ev_station = on,
            PoiType::Hospital => self.hospital = on,
            PoiType::Restaurant => self.restaurant = on,
            PoiType::PetrolStation => self.petrol_station = on,
            PoiType::Other => {}
        }
    }

    pub fn toggle(&mut self, poi_type: PoiType) {
        let on = self.allows(poi_type);
        self.set(poi_type, !on);
    }
}

/// POIs that pass the type filters and, when `favorites_only` is set, are
/// in the favorite set.
pub fn visible_pois<'a>(
    pois: &'a [Poi],
    filters: &TypeFilters,
    favorites_only: bool,
    favorites: &FavoriteStore,
) -> Vec<&'a Poi> {
    pois.iter()
        .filter(|poi| filters.allows(poi.poi_type))
        .filter(|poi| !favorites_only || favorites.contains(&poi.id))
        .collect()
}
