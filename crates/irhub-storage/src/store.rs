//! The redb-backed store shared by every storage trait.
//!
//! One database file holds all tables. Each operation opens its own read or
//! write transaction and commits before returning; nothing is cached.

use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, TableDefinition, WriteTransaction};

use crate::error::Result;

// Devices table: key = device id, value = Device (JSON)
pub(crate) const DEVICES_TABLE: TableDefinition<u64, &str> = TableDefinition::new("devices");

// Settings table: key = setting key, value = Setting (JSON)
pub(crate) const SETTINGS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("app_settings");

// History table: key = entry id, value = CommandHistoryEntry (JSON)
pub(crate) const HISTORY_TABLE: TableDefinition<u64, &str> =
    TableDefinition::new("command_history");

// Groups table: key = group id, value = DeviceGroup (JSON)
pub(crate) const GROUPS_TABLE: TableDefinition<u64, &str> = TableDefinition::new("device_groups");

// Membership table: key = (group id, device id), value = GroupMember (JSON)
pub(crate) const MEMBERS_TABLE: TableDefinition<(u64, u64), &str> =
    TableDefinition::new("group_members");

// Id sequences: key = sequence name, value = last issued id
const SEQUENCES_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub(crate) const DEVICE_SEQ: &str = "devices";
pub(crate) const HISTORY_SEQ: &str = "command_history";
pub(crate) const GROUP_SEQ: &str = "device_groups";

/// Persistent store for devices, settings, groups and command history.
pub struct RemoteStore {
    pub(crate) db: Database,
    /// Storage path (":memory:" for a throwaway database).
    path: String,
    /// Backing file of a throwaway database, removed on drop.
    temp_path: Option<PathBuf>,
}

impl RemoteStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = if path_ref.exists() {
            Database::open(path_ref)?
        } else {
            Database::create(path_ref)?
        };

        let store = Self {
            db,
            path: path_ref.to_string_lossy().to_string(),
            temp_path: None,
        };
        store.create_tables()?;
        tracing::debug!(path = %store.path, "Opened remote store");
        Ok(store)
    }

    /// Create a store backed by a temporary file that is removed on drop.
    ///
    /// redb has no true in-memory mode.
    pub fn memory() -> Result<Self> {
        let temp_path = std::env::temp_dir().join(format!("irhub_{}.redb", uuid::Uuid::new_v4()));
        let db = Database::create(&temp_path)?;
        let store = Self {
            db,
            path: ":memory:".to_string(),
            temp_path: Some(temp_path),
        };
        store.create_tables()?;
        Ok(store)
    }

    /// Storage path, or ":memory:".
    pub fn path(&self) -> &str {
        &self.path
    }

    fn create_tables(&self) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _devices = write_txn.open_table(DEVICES_TABLE)?;
            let _settings = write_txn.open_table(SETTINGS_TABLE)?;
            let _history = write_txn.open_table(HISTORY_TABLE)?;
            let _groups = write_txn.open_table(GROUPS_TABLE)?;
            let _members = write_txn.open_table(MEMBERS_TABLE)?;
            let _sequences = write_txn.open_table(SEQUENCES_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Issue the next id of a sequence inside an open write transaction.
///
/// Ids start at 1 and are never reused, even after deletes.
pub(crate) fn next_id(txn: &WriteTransaction, sequence: &str) -> Result<u64> {
    let mut table = txn.open_table(SEQUENCES_TABLE)?;
    let last = table.get(sequence)?.map(|v| v.value()).unwrap_or(0);
    let next = last + 1;
    table.insert(sequence, next)?;
    Ok(next)
}

impl Drop for RemoteStore {
    fn drop(&mut self) {
        if let Some(temp_path) = &self.temp_path {
            if let Err(e) = std::fs::remove_file(temp_path) {
                tracing::debug!(
                    "Failed to remove temporary database file {}: {}",
                    temp_path.display(),
                    e
                );
            }
        }
    }
}
