//! Command request and dispatch report types.

use serde::{Deserialize, Serialize};

use irhub_core::DeviceId;

use crate::transmitter::TransmitOutcome;

/// A request to press one button on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub device_id: DeviceId,
    /// Button name, looked up in the device's IR codes.
    pub command: String,
}

impl CommandRequest {
    pub fn new(device_id: DeviceId, command: impl Into<String>) -> Self {
        Self {
            device_id,
            command: command.into(),
        }
    }
}

/// Result of a dispatch that reached the transmitter.
///
/// `success` is false whenever the code was not delivered, even though the
/// dispatch itself completed.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub success: bool,
    pub message: String,
    /// Device name.
    pub device: String,
    pub command: String,
    /// The code that was (or would have been) transmitted.
    pub ir_code: String,
    #[serde(skip)]
    pub outcome: TransmitOutcome,
}
