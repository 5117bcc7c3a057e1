use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{Collection, RecordStore, StoreError};

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<Collection, String>>,
}

impl RecordStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Option<String>, StoreError> {
        let blobs = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(&collection).cloned())
    }

    fn write(&self, collection: Collection, blob: String) -> Result<(), StoreError> {
        let mut blobs = self.blobs.write().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(collection, blob);
        Ok(())
    }

    fn backend_tag(&self) -> &'static str {
        "memory"
    }
}
