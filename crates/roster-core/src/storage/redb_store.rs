//! # redb-backed Local Storage
//!
//! A single redb table of string slots. Each write is its own transaction,
//! so a slot is either fully written or untouched.

use super::KeyValueStore;
use crate::RosterError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for slots: key -> value
const SLOTS: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

fn io_err(e: impl std::fmt::Display) -> RosterError {
    RosterError::Storage(e.to_string())
}

/// Disk-backed key-value storage.
pub struct RedbStorage {
    db: Database,
}

impl std::fmt::Debug for RedbStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStorage").finish_non_exhaustive()
    }
}

impl RedbStorage {
    /// Open or create the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Create the table up front so reads on a fresh file succeed.
        let write_txn = db.begin_write().map_err(io_err)?;
        {
            let _ = write_txn.open_table(SLOTS).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStorage {
    fn get(&self, key: &str) -> Result<Option<String>, RosterError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SLOTS).map_err(io_err)?;
        let value = table
            .get(key)
            .map_err(io_err)?
            .map(|v| v.value().to_string());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RosterError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(io_err)?;
            table.insert(key, value).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), RosterError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(io_err)?;
            table.remove(key).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }
}
