//! Storage adapters. The wall persists its post list in a local
//! key-value store and pushes images to a hosted object store.
mod memory;
mod object;
mod sqlite;

pub use memory::MemoryStorage;
pub use object::{ObjectStore, SupabaseStorage};
pub use sqlite::SqliteStorage;

use crate::WallResult;

/// String values by string key, the shape of browser-local storage.
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> WallResult<Option<String>>;
    /// Overwrites whatever was stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> WallResult<()>;
}
