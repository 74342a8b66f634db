use history::{KeyValueStorage, StorageError};
use web_sys::{Storage, window};

/// `window.localStorage`, the browser's durable key-value store.
///
/// Each history write is a single `setItem`, so a reader never sees half a
/// sequence.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Bind to the page's local storage. Private browsing modes may deny it, in
    /// which case reads come back empty and writes fail.
    pub fn new() -> Self {
        let storage = window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available; predictions will not be kept");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("{:?}", e)))
    }
}
