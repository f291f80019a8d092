//! Storage traits.
//!
//! Every operation runs against the persistent store and commits before it
//! returns. Implementations must be safe to share across request tasks.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{
    CommandHistoryEntry, Device, DeviceFields, DeviceGroup, DeviceId, GroupId, GroupView,
    HistoryItem,
};

/// Device records.
pub trait DeviceStore: Send + Sync {
    /// All devices, newest first.
    fn list_devices(&self) -> Result<Vec<Device>>;

    fn get_device(&self, id: DeviceId) -> Result<Option<Device>>;

    /// Create a device with a fresh id and timestamps.
    fn create_device(&self, fields: DeviceFields) -> Result<Device>;

    /// Replace every mutable field. `NotFound` if the device is absent.
    fn update_device(&self, id: DeviceId, fields: DeviceFields) -> Result<Device>;

    /// Remove a device and its group memberships. `NotFound` if absent.
    fn delete_device(&self, id: DeviceId) -> Result<()>;

    /// Insert or overwrite one button's code, leaving the others untouched.
    fn set_ir_code(&self, id: DeviceId, button: &str, code: &str) -> Result<Device>;
}

/// Key/value application settings.
pub trait SettingsStore: Send + Sync {
    fn all_settings(&self) -> Result<BTreeMap<String, String>>;

    fn get_setting(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite every entry in one transaction.
    fn upsert_settings(&self, entries: &BTreeMap<String, String>) -> Result<()>;
}

/// Append-only log of dispatch attempts.
pub trait CommandHistoryLog: Send + Sync {
    fn record(&self, device_id: DeviceId, command: &str, success: bool)
        -> Result<CommandHistoryEntry>;

    /// Most recent entries joined with their device, newest first.
    ///
    /// Entries whose device has been deleted are skipped.
    fn recent(&self, limit: usize) -> Result<Vec<HistoryItem>>;
}

/// Device groups and their memberships.
pub trait GroupStore: Send + Sync {
    fn list_groups(&self) -> Result<Vec<GroupView>>;

    fn create_group(&self, name: &str, icon: Option<&str>) -> Result<DeviceGroup>;

    fn delete_group(&self, id: GroupId) -> Result<()>;

    /// Add a device to a group. Adding an existing member is a no-op.
    fn add_member(&self, group: GroupId, device: DeviceId) -> Result<()>;

    fn remove_member(&self, group: GroupId, device: DeviceId) -> Result<()>;
}
