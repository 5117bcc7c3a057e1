//! Whole-collection record storage.
//!
//! A store holds named collections as opaque serialized blobs and only
//! knows how to read or replace one wholesale. Typed access goes through
//! [`load`] and [`save`].

pub mod cached;
pub mod json_file;
pub mod memory;

use derive_more::{Display, From};
use serde::{Serialize, de::DeserializeOwned};
use strum::{AsRefStr, Display as StrumDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr)]
pub enum Collection {
    #[strum(serialize = "employees")]
    Employees,
    #[strum(serialize = "attendance")]
    Attendance,
}

#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "I/O error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "serialization error: {}", _0)]
    Json(serde_json::Error),
}

impl std::error::Error for StoreError {}

pub trait RecordStore: Send + Sync {
    /// Returns `None` if the collection has never been written.
    fn read(&self, collection: Collection) -> Result<Option<String>, StoreError>;

    /// Replaces the collection wholesale.
    fn write(&self, collection: Collection, blob: String) -> Result<(), StoreError>;

    fn backend_tag(&self) -> &'static str;
}

pub fn load<T: DeserializeOwned>(
    store: &dyn RecordStore,
    collection: Collection,
) -> Result<Vec<T>, StoreError> {
    match store.read(collection)? {
        Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
        _ => Ok(Vec::new()),
    }
}

pub fn save<T: Serialize>(
    store: &dyn RecordStore,
    collection: Collection,
    records: &[T],
) -> Result<(), StoreError> {
    let blob = serde_json::to_string(records)?;
    store.write(collection, blob)?;
    tracing::debug!(
        collection = %collection,
        records = records.len(),
        backend = store.backend_tag(),
        "Collection saved"
    );
    Ok(())
}
