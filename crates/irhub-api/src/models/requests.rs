//! Request bodies.
//!
//! Every field is optional at the wire level so that a missing field is
//! reported with a specific validation message rather than a generic
//! deserialization failure.

use std::collections::BTreeMap;

use serde::Deserialize;

use irhub_commands::CommandRequest;
use irhub_core::{DeviceFields, DeviceId, DeviceStatus};

use super::error::ErrorResponse;

/// Device create/update body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceRequest {
    #[serde(default)]
    pub id: Option<DeviceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ir_codes: Option<BTreeMap<String, String>>,
}

impl DeviceRequest {
    /// Apply defaults for absent fields. `default_status` is used when no
    /// status is given.
    pub fn into_fields(self, default_status: DeviceStatus) -> Result<DeviceFields, ErrorResponse> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ErrorResponse::bad_request("Device name is required"))?;

        let mut fields = DeviceFields::new(name).with_status(default_status);
        if let Some(model) = self.model {
            fields = fields.with_model(model);
        }
        if let Some(device_type) = self.device_type {
            fields = fields.with_type(device_type);
        }
        if let Some(brand) = self.brand {
            fields = fields.with_brand(brand);
        }
        if let Some(status) = self.status {
            fields = fields.with_status(status.parse()?);
        }
        if let Some(ir_codes) = self.ir_codes {
            fields.ir_codes = ir_codes;
        }
        Ok(fields)
    }
}

/// Dispatch body: `{device_id, command}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandBody {
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    #[serde(default)]
    pub command: Option<String>,
}

impl CommandBody {
    pub fn into_request(self) -> Result<CommandRequest, ErrorResponse> {
        match (self.device_id, self.command) {
            (Some(device_id), Some(command)) if !command.trim().is_empty() => {
                Ok(CommandRequest::new(device_id, command))
            }
            _ => Err(ErrorResponse::bad_request(
                "device_id and command are required",
            )),
        }
    }
}

/// Learn body: `{device_id, button, ir_code}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearnBody {
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    #[serde(default)]
    pub button: Option<String>,
    #[serde(default)]
    pub ir_code: Option<String>,
}

impl LearnBody {
    pub fn into_parts(self) -> Result<(DeviceId, String, String), ErrorResponse> {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        if !(present(&self.button) && present(&self.ir_code)) {
            return Err(Self::missing());
        }
        match (self.device_id, self.button, self.ir_code) {
            (Some(id), Some(button), Some(code)) => Ok((id, button, code)),
            _ => Err(Self::missing()),
        }
    }

    fn missing() -> ErrorResponse {
        ErrorResponse::bad_request("Missing required fields: device_id, button, ir_code")
    }
}

/// Group create body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Group membership body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupMemberRequest {
    #[serde(default)]
    pub device_id: Option<DeviceId>,
}
