//! Command history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::device::{Device, DeviceId};

/// One dispatch attempt. Written once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistoryEntry {
    pub id: u64,
    pub device_id: DeviceId,
    pub command: String,
    pub success: bool,
    pub executed_at: DateTime<Utc>,
}

/// History entry joined with the device it targeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: u64,
    pub device_id: DeviceId,
    pub command: String,
    pub success: bool,
    pub executed_at: DateTime<Utc>,
    pub device_name: String,
    pub device_type: String,
}

impl HistoryItem {
    pub fn new(entry: CommandHistoryEntry, device: &Device) -> Self {
        Self {
            id: entry.id,
            device_id: entry.device_id,
            command: entry.command,
            success: entry.success,
            executed_at: entry.executed_at,
            device_name: device.name.clone(),
            device_type: device.device_type.clone(),
        }
    }
}
