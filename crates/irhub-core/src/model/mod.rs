//! Domain model.

pub mod device;
pub mod group;
pub mod history;
pub mod setting;

pub use device::{Device, DeviceFields, DeviceId, DeviceStatus, DeviceSummary};
pub use group::{DeviceGroup, GroupId, GroupMember, GroupView};
pub use history::{CommandHistoryEntry, HistoryItem};
pub use setting::{Setting, setting_value_to_string};
