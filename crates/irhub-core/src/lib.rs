//! Core traits and types for irhub.
//!
//! This crate defines the domain model shared by every other crate: devices,
//! groups, settings and command history, the storage traits the stores
//! implement, the unified error type and configuration defaults.

pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use error::{Error, Result};
pub use model::{
    CommandHistoryEntry, Device, DeviceFields, DeviceGroup, DeviceId, DeviceStatus,
    DeviceSummary, GroupId, GroupView, HistoryItem, Setting,
};
pub use storage::{CommandHistoryLog, DeviceStore, GroupStore, SettingsStore};

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::config::{ServerConfig, defaults, env_vars, settings_keys};
    pub use crate::error::{Error, Result};
    pub use crate::model::*;
    pub use crate::storage::{CommandHistoryLog, DeviceStore, GroupStore, SettingsStore};
}
