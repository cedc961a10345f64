pub mod history_repository;
pub mod kv_store;

pub use history_repository::{HistoryRepository, KvHistoryRepository, HISTORY_KEY};
pub use kv_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
