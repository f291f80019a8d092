//! Shared server state.

use std::sync::Arc;

use irhub_commands::{CommandDispatcher, HttpTransmitter, Transmitter};
use irhub_core::config::{defaults, ServerConfig};
use irhub_core::{CommandHistoryLog, DeviceStore, GroupStore, SettingsStore};
use irhub_storage::RemoteStore;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub devices: Arc<dyn DeviceStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub history: Arc<dyn CommandHistoryLog>,
    pub groups: Arc<dyn GroupStore>,
    pub dispatcher: CommandDispatcher,
    /// Entries returned by a history query without `limit`.
    pub history_limit: usize,
}

impl ServerState {
    /// Build state over one store implementing every storage trait.
    pub fn new<S>(store: Arc<S>, transmitter: Arc<dyn Transmitter>) -> Self
    where
        S: DeviceStore + SettingsStore + CommandHistoryLog + GroupStore + 'static,
    {
        let dispatcher = CommandDispatcher::from_store(store.clone(), transmitter);
        Self {
            devices: store.clone(),
            settings: store.clone(),
            history: store.clone(),
            groups: store,
            dispatcher,
            history_limit: defaults::HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Open the configured database and build an HTTP transmitter.
    pub fn from_config(config: &ServerConfig) -> irhub_core::Result<Self> {
        let store = Arc::new(RemoteStore::open(&config.db_path)?);
        let transmitter = Arc::new(HttpTransmitter::with_timeout(config.transmitter_timeout())?);
        Ok(Self::new(store, transmitter).with_history_limit(config.history_limit))
    }
}
