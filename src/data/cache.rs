use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{load_file, LoadError};
use super::model::TrackTable;

// ---------------------------------------------------------------------------
// Load memoization
// ---------------------------------------------------------------------------

/// Keeps every successfully loaded table for the rest of the process.
///
/// The cache is owned by the application state, which lives as long as the
/// window, so a table is read from disk at most once per path.  Failed loads
/// are not remembered.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<PathBuf, Arc<TrackTable>>,
}

impl TableCache {
    /// Return the cached table for `path`, loading it on first request.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<TrackTable>, LoadError> {
        if let Some(table) = self.tables.get(path) {
            log::debug!("Using cached table for {}", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_file(path)?);
        log::info!(
            "Loaded {} tracks in {} genres from {}",
            table.len(),
            table.genres.len(),
            path.display()
        );
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Whether `path` has already been loaded.
    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.tables.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "track_name,track_genre,popularity\nA,pop,10\nB,pop,90\nC,rock,50\n";

    #[test]
    fn test_second_load_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = TableCache::default();
        let first = cache.get_or_load(&path).unwrap();
        assert!(cache.contains(&path));

        // The file is gone, yet the cached table is still returned.
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");

        let mut cache = TableCache::default();
        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::SourceNotFound(_))
        ));
        assert!(!cache.contains(&path));

        std::fs::write(&path, CSV).unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 3);
    }
}
