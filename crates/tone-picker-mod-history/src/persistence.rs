//! Durable slots backed by redb.
//!
//! A single redb database file with one table, `slots`, mapping a slot key to
//! the JSON text of a [`HistoryState`]. Payloads are stored as raw `&str` so a
//! slot can be inspected or repaired by hand.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::state::HistoryState;

/// Slot table: slot key → JSON snapshot.
const SLOTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("slots");

/// File name of the slot database inside the data directory.
const DB_FILE_NAME: &str = "history.redb";

/// Persistent key-value slots for history snapshots.
///
/// Thread-safe: redb supports concurrent readers and serialized writers.
/// Shared between stores via `Arc<SlotStore>`.
pub struct SlotStore {
    db: Database,
}

impl std::fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotStore").finish()
    }
}

impl SlotStore {
    /// Opens or creates the slot database in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join(DB_FILE_NAME);
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open slot database: {}", db_path.display()))?;

        // Ensure the table exists
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(SLOTS_TABLE)
                .context("Failed to create slots table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        Ok(Arc::new(Self { db }))
    }

    /// Reads the raw payload of a slot, or `None` if it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SLOTS_TABLE)
            .context("Failed to open slots table")?;

        match table.get(key).context("Failed to read slot")? {
            Some(guard) => Ok(Some(guard.value().to_string())),
            None => Ok(None),
        }
    }

    /// Overwrites a slot with `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn save(&self, key: &str, payload: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SLOTS_TABLE)
                .context("Failed to open slots table")?;
            table
                .insert(key, payload)
                .context("Failed to write slot")?;
        }
        write_txn.commit().context("Failed to commit slot write")?;
        Ok(())
    }

    /// Empties a slot. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn clear(&self, key: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SLOTS_TABLE)
                .context("Failed to open slots table")?;
            table.remove(key).context("Failed to clear slot")?;
        }
        write_txn.commit().context("Failed to commit slot clear")?;
        Ok(())
    }

    /// Lists the keys of all non-empty slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn list_keys(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SLOTS_TABLE)
            .context("Failed to open slots table")?;

        let mut keys = Vec::new();
        for entry in table.iter().context("Failed to iterate slots table")? {
            let (key_guard, _) = entry.context("Failed to read slot entry")?;
            keys.push(key_guard.value().to_string());
        }
        Ok(keys)
    }

    /// Serializes `state` and writes it to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_snapshot(&self, key: &str, state: &HistoryState) -> Result<()> {
        let json = serde_json::to_string(state).context("Failed to serialize history snapshot")?;
        self.save(key, &json)
    }

    /// Reads and decodes the snapshot in a slot.
    ///
    /// Returns `Ok(None)` for an empty slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the payload is not a well-formed
    /// `{past, present, future}` object.
    pub fn load_snapshot(&self, key: &str) -> Result<Option<HistoryState>> {
        let Some(payload) = self.load(key)? else {
            return Ok(None);
        };
        let state = serde_json::from_str::<HistoryState>(&payload)
            .with_context(|| format!("Corrupted history snapshot in slot '{key}'"))?;
        Ok(Some(state))
    }
}
