//! Device groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::device::{DeviceId, DeviceSummary};

/// Group identifier.
pub type GroupId = u64;

/// A named collection of devices (e.g. a room).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Membership record linking a device to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub device_id: DeviceId,
    pub added_at: DateTime<Utc>,
}

/// A group with its member devices, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub icon: Option<String>,
    pub devices: Vec<DeviceSummary>,
}
