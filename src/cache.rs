// Memoised dataset loads.
//
// A load is identified by the path it was asked for and the row limit; a
// repeated request with the same pair gets the dataset already in memory.
// Entries live until `clear` is called or the process exits.
use crate::loader::{load_reviews, Dataset, LoadError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static GLOBAL_CACHE: Lazy<DatasetCache> = Lazy::new(DatasetCache::new);

/// Process-wide cache shared by every caller that does not own one.
pub fn global() -> &'static DatasetCache {
    &GLOBAL_CACHE
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<(PathBuf, usize), Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `(path, number_rows)`, reading the file
    /// on a miss. Failed loads are not remembered.
    pub fn get_or_load(&self, path: &Path, number_rows: usize) -> Result<Arc<Dataset>, LoadError> {
        let key = (path.to_path_buf(), number_rows);
        if let Some(ds) = self.lock().get(&key) {
            log::debug!("cache hit for {} ({} rows)", path.display(), number_rows);
            return Ok(Arc::clone(ds));
        }
        // The lock is not held while reading; two racing misses both load
        // and the first insert wins.
        let loaded = Arc::new(load_reviews(path, number_rows)?);
        let mut entries = self.lock();
        let ds = entries.entry(key).or_insert(loaded);
        Ok(Arc::clone(ds))
    }

    pub fn clear(&self) {
        self.lock().clear();
        log::info!("dataset cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(PathBuf, usize), Arc<Dataset>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
