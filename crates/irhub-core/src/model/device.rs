//! Device records and their identifiers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::defaults;
use crate::error::{Error, Result};

/// Server-assigned device identifier.
///
/// Serialized as a JSON number. Requests may address a device with either a
/// number or a numeric string, so `1` and `"1"` are the same device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(DeviceId)
            .map_err(|_| Error::validation(format!("Invalid device id: {}", s)))
    }
}

impl From<u64> for DeviceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

struct DeviceIdVisitor;

impl<'de> Visitor<'de> for DeviceIdVisitor {
    type Value = DeviceId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<DeviceId, E> {
        Ok(DeviceId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<DeviceId, E> {
        u64::try_from(v)
            .map(DeviceId)
            .map_err(|_| E::custom(format!("invalid device id: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<DeviceId, E> {
        v.parse().map_err(|_| E::custom(format!("invalid device id: {}", v)))
    }
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DeviceIdVisitor)
    }
}

/// Reported device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "online" => Ok(DeviceStatus::Online),
            "offline" => Ok(DeviceStatus::Offline),
            other => Err(Error::validation(format!(
                "Invalid status '{}', expected 'online' or 'offline'",
                other
            ))),
        }
    }
}

/// A remote-controlled device and its learned IR codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub model: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub brand: String,
    pub status: DeviceStatus,
    /// Button name -> opaque IR code.
    #[serde(default)]
    pub ir_codes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    /// Build a new record from its mutable fields.
    pub fn from_fields(id: DeviceId, fields: DeviceFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            model: fields.model,
            device_type: fields.device_type,
            brand: fields.brand,
            status: fields.status,
            ir_codes: fields.ir_codes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `created_at` are kept.
    pub fn apply(&mut self, fields: DeviceFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.model = fields.model;
        self.device_type = fields.device_type;
        self.brand = fields.brand;
        self.status = fields.status;
        self.ir_codes = fields.ir_codes;
        self.updated_at = now;
    }

    /// Look up the IR code bound to a button.
    pub fn ir_code(&self, button: &str) -> Option<&str> {
        self.ir_codes.get(button).map(String::as_str)
    }

    /// Current mutable fields.
    pub fn fields(&self) -> DeviceFields {
        DeviceFields {
            name: self.name.clone(),
            model: self.model.clone(),
            device_type: self.device_type.clone(),
            brand: self.brand.clone(),
            status: self.status,
            ir_codes: self.ir_codes.clone(),
        }
    }

    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            id: self.id,
            name: self.name.clone(),
            device_type: self.device_type.clone(),
        }
    }
}

/// The mutable part of a device, as written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFields {
    pub name: String,
    pub model: String,
    pub device_type: String,
    pub brand: String,
    pub status: DeviceStatus,
    pub ir_codes: BTreeMap<String, String>,
}

impl DeviceFields {
    /// Fields with every optional value at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: String::new(),
            device_type: defaults::DEVICE_TYPE.to_string(),
            brand: String::new(),
            status: DeviceStatus::Offline,
            ir_codes: BTreeMap::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_ir_code(mut self, button: impl Into<String>, code: impl Into<String>) -> Self {
        self.ir_codes.insert(button.into(), code.into());
        self
    }

    /// Name must be present; button names must not be blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Device name is required"));
        }
        if self.ir_codes.keys().any(|k| k.trim().is_empty()) {
            return Err(Error::validation("IR code button names must not be empty"));
        }
        Ok(())
    }
}

/// Short device view used inside group listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
}
