//! Device groups and memberships.

use chrono::Utc;
use redb::{ReadableTable, WriteTransaction};

use irhub_core::error::Result as CoreResult;
use irhub_core::model::GroupMember;
use irhub_core::{DeviceGroup, DeviceId, DeviceSummary, GroupId, GroupStore, GroupView};

use crate::devices::device_in;
use crate::error::{Error, Result};
use crate::store::{next_id, RemoteStore, DEVICES_TABLE, GROUPS_TABLE, GROUP_SEQ, MEMBERS_TABLE};

/// Drop every membership of a device. Returns how many were removed.
pub(crate) fn remove_memberships_of(txn: &WriteTransaction, device: DeviceId) -> Result<usize> {
    let mut table = txn.open_table(MEMBERS_TABLE)?;
    let mut keys = Vec::new();
    for result in table.iter()? {
        let (key, _value) = result?;
        let (group, member) = key.value();
        if member == device.get() {
            keys.push((group, member));
        }
    }
    for key in &keys {
        table.remove(*key)?;
    }
    Ok(keys.len())
}

fn group_exists<T: ReadableTable<u64, &'static str>>(table: &T, id: GroupId) -> Result<bool> {
    Ok(table.get(id)?.is_some())
}

impl RemoteStore {
    fn load_groups(&self) -> Result<Vec<GroupView>> {
        let read_txn = self.db.begin_read()?;
        let groups_table = read_txn.open_table(GROUPS_TABLE)?;
        let members_table = read_txn.open_table(MEMBERS_TABLE)?;
        let devices_table = read_txn.open_table(DEVICES_TABLE)?;

        let mut views = Vec::new();
        for result in groups_table.iter()? {
            let (_key, value) = result?;
            let group: DeviceGroup = serde_json::from_str(value.value())?;

            let mut members = Vec::new();
            for entry in members_table.range((group.id, 0)..=(group.id, u64::MAX))? {
                let (_key, value) = entry?;
                members.push(serde_json::from_str::<GroupMember>(value.value())?);
            }
            members.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.device_id.cmp(&b.device_id)));

            let mut devices: Vec<DeviceSummary> = Vec::with_capacity(members.len());
            for member in members {
                if let Some(device) = device_in(&devices_table, member.device_id)? {
                    devices.push(device.summary());
                }
            }

            views.push(GroupView {
                id: group.id,
                name: group.name,
                icon: group.icon,
                devices,
            });
        }
        Ok(views)
    }

    fn insert_group(&self, name: &str, icon: Option<&str>) -> Result<DeviceGroup> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Group name is required".to_string()));
        }

        let write_txn = self.db.begin_write()?;
        let group = DeviceGroup {
            id: next_id(&write_txn, GROUP_SEQ)?,
            name: name.to_string(),
            icon: icon.map(str::to_string),
            created_at: Utc::now(),
        };
        {
            let mut table = write_txn.open_table(GROUPS_TABLE)?;
            let json = serde_json::to_string(&group)?;
            table.insert(group.id, json.as_str())?;
        }
        write_txn.commit()?;

        tracing::info!(group_id = group.id, name = %group.name, "Group created");
        Ok(group)
    }

    fn remove_group(&self, id: GroupId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(GROUPS_TABLE)?;
            let existed = table.remove(id)?.is_some();
            existed
        };
        if !removed {
            return Err(Error::NotFound("Group".to_string()));
        }
        {
            let mut members = write_txn.open_table(MEMBERS_TABLE)?;
            let mut keys = Vec::new();
            for entry in members.range((id, 0)..=(id, u64::MAX))? {
                let (key, _value) = entry?;
                keys.push(key.value());
            }
            for key in keys {
                members.remove(key)?;
            }
        }
        write_txn.commit()?;

        tracing::info!(group_id = id, "Group deleted");
        Ok(())
    }

    fn insert_member(&self, group: GroupId, device: DeviceId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let groups = write_txn.open_table(GROUPS_TABLE)?;
            if !group_exists(&groups, group)? {
                return Err(Error::NotFound("Group".to_string()));
            }
        }
        {
            let devices = write_txn.open_table(DEVICES_TABLE)?;
            if device_in(&devices, device)?.is_none() {
                return Err(Error::NotFound("Device".to_string()));
            }
        }
        {
            let mut members = write_txn.open_table(MEMBERS_TABLE)?;
            let key = (group, device.get());
            let already = members.get(key)?.is_some();
            if already {
                return Ok(());
            }
            let member = GroupMember {
                device_id: device,
                added_at: Utc::now(),
            };
            let json = serde_json::to_string(&member)?;
            members.insert(key, json.as_str())?;
        }
        write_txn.commit()?;

        tracing::info!(group_id = group, device_id = %device, "Device added to group");
        Ok(())
    }

    fn delete_member(&self, group: GroupId, device: DeviceId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut members = write_txn.open_table(MEMBERS_TABLE)?;
            let existed = members.remove((group, device.get()))?.is_some();
            existed
        };
        if !removed {
            return Err(Error::NotFound("Group member".to_string()));
        }
        write_txn.commit()?;

        tracing::info!(group_id = group, device_id = %device, "Device removed from group");
        Ok(())
    }
}

impl GroupStore for RemoteStore {
    fn list_groups(&self) -> CoreResult<Vec<GroupView>> {
        Ok(self.load_groups()?)
    }

    fn create_group(&self, name: &str, icon: Option<&str>) -> CoreResult<DeviceGroup> {
        Ok(self.insert_group(name, icon)?)
    }

    fn delete_group(&self, id: GroupId) -> CoreResult<()> {
        Ok(self.remove_group(id)?)
    }

    fn add_member(&self, group: GroupId, device: DeviceId) -> CoreResult<()> {
        Ok(self.insert_member(group, device)?)
    }

    fn remove_member(&self, group: GroupId, device: DeviceId) -> CoreResult<()> {
        Ok(self.delete_member(group, device)?)
    }
}
