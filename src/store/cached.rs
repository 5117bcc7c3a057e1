use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use super::{Collection, RecordStore, StoreError};

/// Read-through cache of collection blobs in front of another store.
/// Writes go to the inner store first and then replace the cached blob.
pub struct CachedStore<S> {
    inner: S,
    blobs: Cache<Collection, Arc<str>>,
}

impl<S: RecordStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            blobs: Cache::builder()
                .max_capacity(16)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RecordStore> RecordStore for CachedStore<S> {
    fn read(&self, collection: Collection) -> Result<Option<String>, StoreError> {
        if let Some(blob) = self.blobs.get(&collection) {
            return Ok(Some(blob.to_string()));
        }

        let blob = self.inner.read(collection)?;
        if let Some(blob) = &blob {
            self.blobs.insert(collection, Arc::from(blob.as_str()));
        }
        Ok(blob)
    }

    fn write(&self, collection: Collection, blob: String) -> Result<(), StoreError> {
        let cached: Arc<str> = Arc::from(blob.as_str());
        match self.inner.write(collection, blob) {
            Ok(()) => {
                self.blobs.insert(collection, cached);
                Ok(())
            }
            Err(e) => {
                self.blobs.invalidate(&collection);
                Err(e)
            }
        }
    }

    fn backend_tag(&self) -> &'static str {
        self.inner.backend_tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::{load, save};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        reads: AtomicUsize,
    }

    impl RecordStore for CountingStore {
        fn read(&self, collection: Collection) -> Result<Option<String>, StoreError> {
            self.reads.fetch_add(1, Ordering::Relaxed);
            self.inner.read(collection)
        }

        fn write(&self, collection: Collection, blob: String) -> Result<(), StoreError> {
            self.inner.write(collection, blob)
        }

        fn backend_tag(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn repeated_reads_hit_the_cache() {
        let store = CachedStore::new(CountingStore::default(), Duration::from_secs(60));
        save(&store, Collection::Employees, &["a"]).unwrap();

        for _ in 0..3 {
            let items: Vec<String> = load(&store, Collection::Employees).unwrap();
            assert_eq!(items, vec!["a".to_string()]);
        }
        assert_eq!(store.inner().reads.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn write_replaces_cached_blob() {
        let store = CachedStore::new(CountingStore::default(), Duration::from_secs(60));
        save(&store, Collection::Attendance, &[1]).unwrap();
        let _: Vec<i32> = load(&store, Collection::Attendance).unwrap();
        save(&store, Collection::Attendance, &[2]).unwrap();

        let items: Vec<i32> = load(&store, Collection::Attendance).unwrap();
        assert_eq!(items, vec![2]);
    }

    #[test]
    fn never_written_collection_is_not_cached() {
        let store = CachedStore::new(CountingStore::default(), Duration::from_secs(60));
        assert!(store.read(Collection::Employees).unwrap().is_none());
        assert!(store.read(Collection::Employees).unwrap().is_none());
        assert_eq!(store.inner().reads.load(Ordering::Relaxed), 2);
    }
}
