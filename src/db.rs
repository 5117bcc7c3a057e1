use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::store::RecordStore;
use crate::store::cached::CachedStore;
use crate::store::json_file::JsonFileStore;
use crate::store::memory::MemoryStore;

/// Shared handle to the record store. Every read-modify-write runs under
/// `writer` so there is only ever one writer per process.
pub struct RecordDb {
    store: Arc<dyn RecordStore>,
    writer: Mutex<()>,
}

impl RecordDb {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn init_db(config: &Config) -> anyhow::Result<RecordDb> {
    let ttl = Duration::from_secs(config.cache_ttl_secs);

    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::File => {
            let files = JsonFileStore::open(&config.data_dir)
                .with_context(|| format!("Failed to open data directory {}", config.data_dir))?;
            info!(data_dir = %files.root().display(), "Using file record store");
            Arc::new(CachedStore::new(files, ttl))
        }
        StoreBackend::Memory => {
            info!("Using in-memory record store");
            Arc::new(MemoryStore::default())
        }
    };

    Ok(RecordDb::new(store))
}
