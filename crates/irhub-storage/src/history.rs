//! Command history log. Entries are appended and never changed.

use chrono::Utc;
use redb::ReadableTable;

use irhub_core::config::defaults;
use irhub_core::error::Result as CoreResult;
use irhub_core::{CommandHistoryEntry, CommandHistoryLog, DeviceId, HistoryItem};

use crate::devices::device_in;
use crate::error::Result;
use crate::store::{next_id, RemoteStore, DEVICES_TABLE, HISTORY_SEQ, HISTORY_TABLE};

impl RemoteStore {
    fn append_history(
        &self,
        device_id: DeviceId,
        command: &str,
        success: bool,
    ) -> Result<CommandHistoryEntry> {
        let write_txn = self.db.begin_write()?;
        let entry = CommandHistoryEntry {
            id: next_id(&write_txn, HISTORY_SEQ)?,
            device_id,
            command: command.to_string(),
            success,
            executed_at: Utc::now(),
        };
        {
            let mut table = write_txn.open_table(HISTORY_TABLE)?;
            let json = serde_json::to_string(&entry)?;
            table.insert(entry.id, json.as_str())?;
        }
        write_txn.commit()?;

        tracing::debug!(
            entry_id = entry.id,
            device_id = %device_id,
            command,
            success,
            "Command history recorded"
        );
        Ok(entry)
    }

    fn load_recent(&self, limit: usize) -> Result<Vec<HistoryItem>> {
        let limit = limit.min(defaults::HISTORY_MAX_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read()?;
        let history = read_txn.open_table(HISTORY_TABLE)?;
        let devices = read_txn.open_table(DEVICES_TABLE)?;

        // Ids are issued in append order, so the newest entries sit at the end.
        let mut items = Vec::with_capacity(limit);
        for result in history.iter()?.rev() {
            if items.len() == limit {
                break;
            }
            let (_key, value) = result?;
            let entry: CommandHistoryEntry = serde_json::from_str(value.value())?;
            // Entries of deleted devices are kept but not listed.
            if let Some(device) = device_in(&devices, entry.device_id)? {
                items.push(HistoryItem::new(entry, &device));
            }
        }
        items.sort_by(|a, b| b.executed_at.cmp(&a.executed_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }
}

impl CommandHistoryLog for RemoteStore {
    fn record(
        &self,
        device_id: DeviceId,
        command: &str,
        success: bool,
    ) -> CoreResult<CommandHistoryEntry> {
        Ok(self.append_history(device_id, command, success)?)
    }

    fn recent(&self, limit: usize) -> CoreResult<Vec<HistoryItem>> {
        Ok(self.load_recent(limit)?)
    }
}
