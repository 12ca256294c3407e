use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::KeyValueStore;
use crate::{WallError, WallResult};

/// In-memory key-value store. Clones share the same map, which makes it
/// possible to "reload" a store from the data another instance wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> WallResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| WallError::storage_error("memory storage lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> WallResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| WallError::storage_error("memory storage lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
