//! Device records.

use chrono::Utc;
use redb::{ReadableTable, WriteTransaction};

use irhub_core::error::Result as CoreResult;
use irhub_core::{Device, DeviceFields, DeviceId, DeviceStore};

use crate::error::{Error, Result};
use crate::groups::remove_memberships_of;
use crate::store::{next_id, RemoteStore, DEVICES_TABLE, DEVICE_SEQ};

/// Read one device out of an open devices table.
pub(crate) fn device_in<T: ReadableTable<u64, &'static str>>(
    table: &T,
    id: DeviceId,
) -> Result<Option<Device>> {
    match table.get(id.get())? {
        Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
        None => Ok(None),
    }
}

fn save_device(txn: &WriteTransaction, device: &Device) -> Result<()> {
    let mut table = txn.open_table(DEVICES_TABLE)?;
    let json = serde_json::to_string(device)?;
    table.insert(device.id.get(), json.as_str())?;
    Ok(())
}

fn load_for_write(txn: &WriteTransaction, id: DeviceId) -> Result<Device> {
    let table = txn.open_table(DEVICES_TABLE)?;
    device_in(&table, id)?.ok_or_else(|| Error::NotFound("Device".to_string()))
}

fn check_fields(fields: &DeviceFields) -> Result<()> {
    fields
        .validate()
        .map_err(|e| Error::InvalidInput(validation_message(e)))
}

fn validation_message(e: irhub_core::Error) -> String {
    match e {
        irhub_core::Error::Validation(msg) => msg,
        other => other.to_string(),
    }
}

impl RemoteStore {
    fn load_devices(&self) -> Result<Vec<Device>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEVICES_TABLE)?;

        let mut devices = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            devices.push(serde_json::from_str::<Device>(value.value())?);
        }
        devices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(devices)
    }

    fn load_device(&self, id: DeviceId) -> Result<Option<Device>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEVICES_TABLE)?;
        device_in(&table, id)
    }

    fn insert_device(&self, fields: DeviceFields) -> Result<Device> {
        check_fields(&fields)?;

        let write_txn = self.db.begin_write()?;
        let id = DeviceId::new(next_id(&write_txn, DEVICE_SEQ)?);
        let device = Device::from_fields(id, fields, Utc::now());
        save_device(&write_txn, &device)?;
        write_txn.commit()?;

        tracing::info!(device_id = %device.id, name = %device.name, "Device created");
        Ok(device)
    }

    fn replace_device(&self, id: DeviceId, fields: DeviceFields) -> Result<Device> {
        check_fields(&fields)?;

        let write_txn = self.db.begin_write()?;
        let mut device = load_for_write(&write_txn, id)?;
        device.apply(fields, Utc::now());
        save_device(&write_txn, &device)?;
        write_txn.commit()?;

        tracing::info!(device_id = %id, "Device updated");
        Ok(device)
    }

    fn remove_device(&self, id: DeviceId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(DEVICES_TABLE)?;
            let existed = table.remove(id.get())?.is_some();
            existed
        };
        if !removed {
            return Err(Error::NotFound("Device".to_string()));
        }
        let memberships = remove_memberships_of(&write_txn, id)?;
        write_txn.commit()?;

        tracing::info!(device_id = %id, memberships, "Device deleted");
        Ok(())
    }

    fn learn_code(&self, id: DeviceId, button: &str, code: &str) -> Result<Device> {
        if button.trim().is_empty() {
            return Err(Error::InvalidInput("Button name is required".to_string()));
        }

        let write_txn = self.db.begin_write()?;
        let mut device = load_for_write(&write_txn, id)?;
        device.ir_codes.insert(button.to_string(), code.to_string());
        device.updated_at = Utc::now();
        save_device(&write_txn, &device)?;
        write_txn.commit()?;

        tracing::info!(device_id = %id, button, "IR code saved");
        Ok(device)
    }
}

impl DeviceStore for RemoteStore {
    fn list_devices(&self) -> CoreResult<Vec<Device>> {
        Ok(self.load_devices()?)
    }

    fn get_device(&self, id: DeviceId) -> CoreResult<Option<Device>> {
        Ok(self.load_device(id)?)
    }

    fn create_device(&self, fields: DeviceFields) -> CoreResult<Device> {
        Ok(self.insert_device(fields)?)
    }

    fn update_device(&self, id: DeviceId, fields: DeviceFields) -> CoreResult<Device> {
        Ok(self.replace_device(id, fields)?)
    }

    fn delete_device(&self, id: DeviceId) -> CoreResult<()> {
        Ok(self.remove_device(id)?)
    }

    fn set_ir_code(&self, id: DeviceId, button: &str, code: &str) -> CoreResult<Device> {
        Ok(self.learn_code(id, button, code)?)
    }
}
