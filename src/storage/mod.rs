mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::sync::Arc;

use crate::error::{PersistenceError, StorageError};
use crate::tracker::store::WorkoutStore;
use crate::types::record::WorkoutRecord;

pub const DEFAULT_KEY: &str = "storedWorkouts";

/// A durable string-to-string slot map.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Serializes the workout store into one named slot and reads it back.
#[derive(Clone)]
pub struct PersistenceAdapter {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrites the slot with every workout in display order.
    pub fn save(&self, store: &WorkoutStore) -> Result<(), PersistenceError> {
        let records: Vec<WorkoutRecord> = store.all().iter().map(WorkoutRecord::from).collect();
        let payload = serde_json::to_string(&records).map_err(PersistenceError::Encode)?;
        self.backend.set(&self.key, &payload)?;
        tracing::debug!("Saved {} workouts to '{}'", records.len(), self.key);
        Ok(())
    }

    /// `Ok(None)` when the slot has never been written.
    pub fn try_load(&self) -> Result<Option<Vec<WorkoutRecord>>, PersistenceError> {
        let Some(payload) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        let records = serde_json::from_str(&payload).map_err(PersistenceError::Decode)?;
        Ok(Some(records))
    }

    /// Reads the slot. Absent, unreadable and malformed payloads all come back
    /// as `None`, which is the normal first-run state.
    pub fn load(&self) -> Option<Vec<WorkoutRecord>> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("Ignoring stored workouts in '{}': {}", self.key, err);
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove(&self.key)?;
        tracing::info!("Cleared stored workouts in '{}'", self.key);
        Ok(())
    }
}
