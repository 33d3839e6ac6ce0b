use crate::sdk::poi::types::Poi;
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_FAVORITES_FILE: &str = "chargeway-favorites.json";

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to write favorites to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The user's favorite POIs, persisted as one JSON list.
///
/// Loaded once, rewritten after every change. Adding an id that is already
/// present, or removing one that is not, changes nothing.
#[derive(Debug, Default)]
pub struct FavoriteStore {
    path: Option<PathBuf>,
    favorites: Vec<Poi>,
}

impl FavoriteStore {
    /// A store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reads favorites from `path`. A missing file is an empty set; an
    /// unreadable one is logged and also treated as empty.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let favorites = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str::<Vec<Poi>>(&data).unwrap_or_else(|err| {
                log::error!("Error parsing favorites in {}: {}", path.display(), err);
                Vec::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::error!("Error reading favorites from {}: {}", path.display(), err);
                Vec::new()
            }
        };
        log::debug!("Loaded {} favorites from {}", favorites.len(), path.display());
        Self {
            path: Some(path),
            favorites,
        }
    }

    pub fn list(&self) -> &[Poi] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|fav| fav.id == id)
    }

    /// Returns whether the set changed.
    pub fn add(&mut self, poi: &Poi) -> Result<bool, FavoritesError> {
        if self.contains(&poi.id) {
            return Ok(false);
        }
        let mut next = self.favorites.clone();
        next.push(poi.clone());
        self.commit(next)?;
        Ok(true)
    }

    /// Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> Result<bool, FavoritesError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let next: Vec<Poi> = self
            .favorites
            .iter()
            .filter(|fav| fav.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Flips membership of `poi`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, poi: &Poi) -> Result<bool, FavoritesError> {
        if self.contains(&poi.id) {
            self.remove(&poi.id)?;
            Ok(false)
        } else {
            self.add(poi)?;
            Ok(true)
        }
    }

    /// Writes `next` to disk and only then makes it the current set, so a
    /// failed write leaves memory and file in agreement.
    fn commit(&mut self, next: Vec<Poi>) -> Result<(), FavoritesError> {
        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&next)?;
            fs::write(path, data).map_err(|source| FavoritesError::Write {
                path: path.clone(),
                source,
            })?;
        }
        self.favorites = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::poi::types::{PoiSource, PoiType};

    fn station(id: &str) -> Poi {
        Poi {
            id: id.to_string(),
            name: format!("Station {id}"),
            poi_type: PoiType::EvStation,
            latitude: 40.0,
            longitude: -74.0,
            address: String::new(),
            connectors: Some(vec!["CCS".into()]),
            status: Some("Available".into()),
            source: PoiSource::OpenChargeMap,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chargeway-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut store = FavoriteStore::in_memory();
        assert!(store.add(&station("ocm-1")).unwrap());
        assert!(!store.add(&station("ocm-1")).unwrap());
        assert_eq!(store.len(), 1);

        assert!(store.remove("ocm-1").unwrap());
        assert!(!store.remove("ocm-1").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut store = FavoriteStore::in_memory();
        assert!(store.toggle(&station("a")).unwrap());
        assert!(store.contains("a"));
        assert!(!store.toggle(&station("a")).unwrap());
        assert!(!store.contains("a"));
    }

    #[test]
    fn persists_across_reloads() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut store = FavoriteStore::load_from_file(&path);
        assert!(store.is_empty());
        store.add(&station("ocm-7")).unwrap();
        store.add(&station("ocm-8")).unwrap();
        store.remove("ocm-7").unwrap();

        let reloaded = FavoriteStore::load_from_file(&path);
        assert_eq!(reloaded.list(), &[station("ocm-8")]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failed_write_leaves_the_set_unchanged() {
        let path = std::env::temp_dir()
            .join(format!("chargeway-missing-dir-{}", std::process::id()))
            .join("favorites.json");

        let mut store = FavoriteStore::load_from_file(&path);
        assert!(matches!(
            store.add(&station("ocm-1")),
            Err(FavoritesError::Write { .. })
        ));
        assert!(!store.contains("ocm-1"));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_remove_keeps_the_favorite() {
        let path = temp_path("readonly-remove");
        let _ = fs::remove_dir(&path);
        let _ = fs::remove_file(&path);
        let mut store = FavoriteStore::load_from_file(&path);
        store.add(&station("ocm-2")).unwrap();

        // Swap the file for a directory so the next write fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.remove("ocm-2").is_err());
        assert!(store.contains("ocm-2"));
        assert_eq!(store.len(), 1);

        fs::remove_dir(&path).unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let store = FavoriteStore::load_from_file(&path);
        assert!(store.is_empty());
        let _ = fs::remove_file(&path);
    }
}
