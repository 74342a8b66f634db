use model::PredictionRecord;
use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key under which the whole history is kept.
pub const HISTORY_KEY: &str = "predictions";

/// Error types for history mutations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to serialize prediction history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persisted, newest-first list of past predictions.
///
/// Records have no identity besides their position. Every removal shifts the
/// positions of the records after it, so callers must re-read [`list`]
/// before deleting again.
///
/// Each mutation writes the whole sequence back before returning. If that
/// write fails the mutation is undone, so the in-memory list never differs
/// from what a reload would produce.
///
/// [`list`]: PredictionStore::list
#[derive(Debug)]
pub struct PredictionStore<K> {
    storage: K,
    records: Vec<PredictionRecord>,
}

impl<K: KeyValueStorage> PredictionStore<K> {
    /// Read the persisted history. Missing or unreadable data yields an empty
    /// history; this never fails.
    pub fn load(storage: K) -> Self {
        let records = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<PredictionRecord>>(&raw) {
                Ok(records) => {
                    debug!("Loaded {} prediction records", records.len());
                    records
                }
                Err(e) => {
                    warn!("Discarding unreadable prediction history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No prediction history stored yet");
                Vec::new()
            }
            Err(e) => {
                warn!("Prediction history could not be read: {}", e);
                Vec::new()
            }
        };

        Self { storage, records }
    }

    pub fn list(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert `record` as the newest entry and persist.
    ///
    /// Identical records are kept as separate entries.
    pub fn append(&mut self, record: PredictionRecord) -> Result<(), StoreError> {
        trace!(
            "Appending prediction record ({}%)",
            record.cancellation_probability
        );
        self.records.insert(0, record);

        if let Err(e) = self.persist() {
            error!("Failed to persist appended prediction: {}", e);
            self.records.remove(0);
            return Err(e);
        }

        debug!("Prediction history now holds {} records", self.records.len());
        Ok(())
    }

    /// Delete the record at `index` and persist.
    ///
    /// An index past the end is ignored and returns `Ok(None)` without
    /// touching storage.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<PredictionRecord>, StoreError> {
        if index >= self.records.len() {
            debug!(
                "Ignoring removal at {}: history holds {} records",
                index,
                self.records.len()
            );
            return Ok(None);
        }

        let removed = self.records.remove(index);
        if let Err(e) = self.persist() {
            error!("Failed to persist removal at {}: {}", index, e);
            self.records.insert(index, removed);
            return Err(e);
        }

        debug!("Removed prediction record at {}", index);
        Ok(Some(removed))
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Give back the storage handle, e.g. to reload it as a new session would.
    pub fn into_storage(self) -> K {
        self.storage
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.records)?;
        self.storage.set(HISTORY_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    fn record(minute: u32, probability: f64) -> PredictionRecord {
        PredictionRecord::new(at(minute), probability).unwrap()
    }

    /// Storage whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        reject_writes: bool,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.reject_writes {
                return Err(StorageError::Io("disk full".to_string()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_load_without_prior_state_is_empty() {
        let store = PredictionStore::load(MemoryStorage::new());
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_load_corrupt_state_is_empty() {
        for raw in [
            "not json",
            "{\"a\":1}",
            "[{\"prediction_time\":42}]",
            "[{\"prediction_time\":\"2025-03-14T18:05:00\",\"cancellation_probability\":150.0}]",
        ] {
            let store = PredictionStore::load(MemoryStorage::with_entry(HISTORY_KEY, raw));
            assert!(store.is_empty(), "expected empty history for {:?}", raw);
        }
    }

    #[test]
    fn test_append_places_newest_first() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        for minute in 0..4 {
            store.append(record(minute, 10.0 * minute as f64)).unwrap();
            assert_eq!(store.list()[0], record(minute, 10.0 * minute as f64));
        }

        let minutes: Vec<_> = store.list().iter().map(|r| r.prediction_time).collect();
        assert_eq!(minutes, vec![at(3), at(2), at(1), at(0)]);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        store.append(record(5, 42.0)).unwrap();
        store.append(record(5, 42.0)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], store.list()[1]);
    }

    #[test]
    fn test_remove_middle_record_shifts_later_positions() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        store.append(record(0, 10.0)).unwrap();
        store.append(record(1, 50.0)).unwrap();
        store.append(record(2, 90.0)).unwrap();

        let removed = store.remove_at(1).unwrap();

        assert_eq!(removed, Some(record(1, 50.0)));
        assert_eq!(store.list(), &[record(2, 90.0), record(0, 10.0)]);
    }

    #[test]
    fn test_remove_out_of_range_is_a_no_op() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        assert_eq!(store.remove_at(0).unwrap(), None);

        store.append(record(0, 10.0)).unwrap();
        store.append(record(1, 20.0)).unwrap();
        let before = store.list().to_vec();

        assert_eq!(store.remove_at(2).unwrap(), None);
        assert_eq!(store.remove_at(usize::MAX).unwrap(), None);
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_reload_reproduces_history() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        store.append(record(0, 12.5)).unwrap();
        store.append(record(1, 82.0)).unwrap();
        store.append(record(2, 30.0)).unwrap();
        store.remove_at(0).unwrap();
        let final_list = store.list().to_vec();

        let reloaded = PredictionStore::load(store.into_storage());
        assert_eq!(reloaded.list(), final_list.as_slice());
    }

    #[test]
    fn test_reload_after_removing_everything_is_empty() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        store.append(record(0, 12.5)).unwrap();
        store.remove_at(0).unwrap();

        let storage = store.into_storage();
        assert_eq!(storage.get(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
        assert!(PredictionStore::load(storage).is_empty());
    }

    #[test]
    fn test_persisted_text_matches_memory_after_each_mutation() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        store.append(record(0, 1.0)).unwrap();
        store.append(record(1, 2.0)).unwrap();
        store.remove_at(1).unwrap();

        let persisted = store.storage().get(HISTORY_KEY).unwrap().unwrap();
        assert_eq!(persisted, serde_json::to_string(store.list()).unwrap());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = PredictionStore::load(FlakyStorage::default());
        store.append(record(0, 10.0)).unwrap();
        store.append(record(1, 20.0)).unwrap();
        let before = store.list().to_vec();

        let mut storage = store.into_storage();
        storage.reject_writes = true;
        let mut store = PredictionStore::load(storage);

        assert!(matches!(
            store.append(record(2, 30.0)),
            Err(StoreError::Storage(_))
        ));
        assert!(store.remove_at(0).is_err());
        assert_eq!(store.list(), before.as_slice());
    }
}
