//! Dispatch errors.

use irhub_core::DeviceId;

/// Why a command could not be dispatched.
///
/// None of these write a history entry, except `Storage` when it is raised
/// by the history write itself.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request is missing required fields.
    #[error("{0}")]
    Validation(String),

    #[error("Device not found")]
    DeviceNotFound(DeviceId),

    /// The device has no IR code for the requested button.
    #[error("Command {command} not found for device")]
    CommandUnsupported { device_id: DeviceId, command: String },

    #[error(transparent)]
    Storage(#[from] irhub_core::Error),
}
