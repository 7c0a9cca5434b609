//! # Local Key-Value Storage
//!
//! String slots that survive between runs, the way browser local storage
//! does for a web client.
//!
//! ## Backends
//!
//! - `MemoryStorage`: `BTreeMap`-backed, volatile
//! - `RedbStorage`: redb-backed, persisted to a single file
//!
//! Persistence is best effort: callers treat write failures as non-fatal.

mod redb_store;

pub use redb_store::RedbStorage;

use crate::RosterError;
use std::collections::BTreeMap;

/// A string-to-string slot store.
pub trait KeyValueStore {
    /// Read a slot.
    fn get(&self, key: &str) -> Result<Option<String>, RosterError>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), RosterError>;

    /// Clear a slot. Clearing an empty slot is not an error.
    fn remove(&mut self, key: &str) -> Result<(), RosterError>;
}

/// Volatile in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, RosterError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RosterError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), RosterError> {
        self.slots.remove(key);
        Ok(())
    }
}
