//! Common test utilities for API tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use irhub_api::ServerState;
use irhub_commands::{TransmitOutcome, Transmitter};
use irhub_core::prelude::*;
use irhub_storage::RemoteStore;

/// Transmitter that answers with a fixed outcome when an endpoint is set.
pub struct StubTransmitter {
    outcome: TransmitOutcome,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl StubTransmitter {
    pub fn new(outcome: TransmitOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transmitter for StubTransmitter {
    async fn send(&self, endpoint: Option<&str>, code: &str, device_name: &str) -> TransmitOutcome {
        match endpoint {
            Some(e) if !e.trim().is_empty() => {
                self.sent
                    .lock()
                    .unwrap()
                    .push((code.to_string(), device_name.to_string()));
                self.outcome.clone()
            }
            _ => TransmitOutcome::NotConfigured,
        }
    }
}

/// Test fixture: server state over a throwaway store.
pub struct TestContext {
    pub state: ServerState,
    pub store: Arc<RemoteStore>,
    pub transmitter: Arc<StubTransmitter>,
}

pub fn create_test_context(outcome: TransmitOutcome) -> TestContext {
    let store = Arc::new(RemoteStore::memory().unwrap());
    let transmitter = StubTransmitter::new(outcome);
    let state = ServerState::new(store.clone(), transmitter.clone());
    TestContext {
        state,
        store,
        transmitter,
    }
}

pub fn create_test_server_state() -> ServerState {
    create_test_context(TransmitOutcome::Delivered).state
}

impl TestContext {
    pub fn add_tv(&self) -> Device {
        self.store
            .create_device(DeviceFields::new("Living room TV").with_ir_code("power", "0xA1B2"))
            .unwrap()
    }

    pub fn set_endpoint(&self, endpoint: &str) {
        let mut settings = BTreeMap::new();
        settings.insert(settings_keys::IR_ENDPOINT.to_string(), endpoint.to_string());
        self.store.upsert_settings(&settings).unwrap();
    }
}
