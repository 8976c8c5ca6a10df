//! Keyed JSON blob storage for a single player.
//!
//! Each record type owns a fixed key and springs into existence with
//! defaults on first read. A stored blob that fails to parse degrades to
//! the default and is logged — one corrupt blob must never take down
//! unrelated operations.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed per-player record persisted under a fixed store key.
pub trait PlayerRecord: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    blobs: HashMap<String, String>,
}

impl BlobStore {
    pub fn new() -> Self {
        BlobStore::default()
    }

    /// Load a record, filling in the default when absent or unparseable.
    pub fn load<T: PlayerRecord>(&self) -> T {
        self.load_existing::<T>().unwrap_or_default()
    }

    /// Load a record only if the key has ever been written.
    /// A present-but-corrupt blob degrades to the default.
    pub fn load_existing<T: PlayerRecord>(&self) -> Option<T> {
        let raw = self.blobs.get(T::KEY)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("blob {} failed to parse ({err}), using defaults", T::KEY);
                Some(T::default())
            }
        }
    }

    pub fn contains<T: PlayerRecord>(&self) -> bool {
        self.blobs.contains_key(T::KEY)
    }

    pub fn save<T: PlayerRecord>(&mut self, record: &T) {
        match serde_json::to_string(record) {
            Ok(raw) => {
                self.blobs.insert(T::KEY.to_string(), raw);
            }
            Err(err) => log::error!("blob {} failed to serialize: {err}", T::KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::records::PlayerLevelData;

    #[test]
    fn absent_record_yields_default() {
        let store = BlobStore::new();
        let data: PlayerLevelData = store.load();
        assert_eq!(data.level, 1);
        assert_eq!(data.xp, 0);
        assert!(store.load_existing::<PlayerLevelData>().is_none());
    }

    #[test]
    fn corrupt_blob_degrades_to_default() {
        let mut store = BlobStore::new();
        store
            .blobs
            .insert(PlayerLevelData::KEY.to_string(), "{not json".to_string());
        let data: PlayerLevelData = store.load();
        assert_eq!(data.level, 1);
        // the key still counts as present
        assert!(store.load_existing::<PlayerLevelData>().is_some());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = BlobStore::new();
        let mut data: PlayerLevelData = store.load();
        data.level = 4;
        data.xp = 250;
        store.save(&data);
        let back: PlayerLevelData = store.load();
        assert_eq!(back.level, 4);
        assert_eq!(back.xp, 250);
    }
}
