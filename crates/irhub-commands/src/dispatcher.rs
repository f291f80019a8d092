//! Command dispatcher.
//!
//! Resolves a device and its IR code, reads the relay endpoint, hands the
//! code to the transmitter and records the attempt in the history log.
//! Requests that fail to resolve a device or command are not recorded.

use std::sync::Arc;

use irhub_core::config::settings_keys;
use irhub_core::{CommandHistoryLog, DeviceStore, SettingsStore};

use crate::command::{CommandRequest, DispatchReport};
use crate::error::DispatchError;
use crate::transmitter::Transmitter;

/// Orchestrates lookup, transmission and logging for one command.
#[derive(Clone)]
pub struct CommandDispatcher {
    devices: Arc<dyn DeviceStore>,
    settings: Arc<dyn SettingsStore>,
    history: Arc<dyn CommandHistoryLog>,
    transmitter: Arc<dyn Transmitter>,
}

impl CommandDispatcher {
    pub fn new(
        devices: Arc<dyn DeviceStore>,
        settings: Arc<dyn SettingsStore>,
        history: Arc<dyn CommandHistoryLog>,
        transmitter: Arc<dyn Transmitter>,
    ) -> Self {
        Self {
            devices,
            settings,
            history,
            transmitter,
        }
    }

    /// Build a dispatcher over a single store implementing every trait.
    pub fn from_store<S>(store: Arc<S>, transmitter: Arc<dyn Transmitter>) -> Self
    where
        S: DeviceStore + SettingsStore + CommandHistoryLog + 'static,
    {
        Self::new(store.clone(), store.clone(), store, transmitter)
    }

    /// Dispatch one command. Exactly one history entry is written once the
    /// device and its code have been resolved, whatever the delivery outcome.
    pub async fn dispatch(&self, request: &CommandRequest) -> Result<DispatchReport, DispatchError> {
        if request.command.trim().is_empty() {
            return Err(DispatchError::Validation(
                "device_id and command are required".to_string(),
            ));
        }

        let device = self
            .devices
            .get_device(request.device_id)?
            .ok_or(DispatchError::DeviceNotFound(request.device_id))?;

        let ir_code = device
            .ir_code(&request.command)
            .ok_or_else(|| DispatchError::CommandUnsupported {
                device_id: device.id,
                command: request.command.clone(),
            })?
            .to_string();

        let endpoint = self.settings.get_setting(settings_keys::IR_ENDPOINT)?;

        let outcome = self
            .transmitter
            .send(endpoint.as_deref(), &ir_code, &device.name)
            .await;
        let success = outcome.is_delivered();

        self.history.record(device.id, &request.command, success)?;

        tracing::info!(
            device_id = %device.id,
            command = %request.command,
            success,
            "Command dispatched"
        );

        Ok(DispatchReport {
            success,
            message: outcome.message(),
            device: device.name,
            command: request.command.clone(),
            ir_code,
            outcome,
        })
    }
}
