//! Application settings.

use std::collections::BTreeMap;

use chrono::Utc;
use redb::ReadableTable;

use irhub_core::error::Result as CoreResult;
use irhub_core::{Setting, SettingsStore};

use crate::error::Result;
use crate::store::{RemoteStore, SETTINGS_TABLE};

impl RemoteStore {
    fn load_settings(&self) -> Result<BTreeMap<String, String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        let mut settings = BTreeMap::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let setting: Setting = serde_json::from_str(value.value())?;
            settings.insert(setting.key, setting.value);
        }
        Ok(settings)
    }

    fn load_setting(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        let setting = match table.get(key)? {
            Some(value) => Some(serde_json::from_str::<Setting>(value.value())?),
            None => None,
        };
        Ok(setting.map(|s| s.value))
    }

    fn save_settings(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let now = Utc::now();
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            for (key, value) in entries {
                let setting = Setting {
                    key: key.clone(),
                    value: value.clone(),
                    updated_at: now,
                };
                let json = serde_json::to_string(&setting)?;
                table.insert(key.as_str(), json.as_str())?;
            }
        }
        write_txn.commit()?;

        tracing::info!(count = entries.len(), "Settings updated");
        Ok(())
    }
}

impl SettingsStore for RemoteStore {
    fn all_settings(&self) -> CoreResult<BTreeMap<String, String>> {
        Ok(self.load_settings()?)
    }

    fn get_setting(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.load_setting(key)?)
    }

    fn upsert_settings(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
        Ok(self.save_settings(entries)?)
    }
}
