//! Durable prediction history.
//!
//! [`PredictionStore`] owns the ordered list of past predictions and writes it
//! through a [`KeyValueStorage`] after every change. Each client shell brings
//! its own storage backend; [`MemoryStorage`] stands in for tests.

mod storage;
mod store;

pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::{HISTORY_KEY, PredictionStore, StoreError};
