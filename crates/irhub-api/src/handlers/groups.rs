//! Device group handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use irhub_core::{DeviceGroup, DeviceId, GroupId, GroupView};

use super::common::{created, extract_path, json_body, message, ok, CreatedResult, HandlerResult};
use super::ServerState;
use crate::models::{ErrorResponse, GroupMemberRequest, GroupRequest};

pub async fn list_groups_handler(State(state): State<ServerState>) -> HandlerResult<Vec<GroupView>> {
    ok(state.groups.list_groups()?)
}

pub async fn create_group_handler(
    State(state): State<ServerState>,
    payload: Result<Json<GroupRequest>, JsonRejection>,
) -> CreatedResult<DeviceGroup> {
    let req = json_body(payload)?;
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ErrorResponse::bad_request("Group name is required"))?;
    created(state.groups.create_group(&name, req.icon.as_deref())?)
}

pub async fn delete_group_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let id: GroupId = extract_path(&id)?;
    state.groups.delete_group(id)?;
    message("Group deleted successfully")
}

pub async fn add_group_device_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<GroupMemberRequest>, JsonRejection>,
) -> HandlerResult<Value> {
    let group: GroupId = extract_path(&id)?;
    let device = json_body(payload)?
        .device_id
        .ok_or_else(|| ErrorResponse::bad_request("Device ID is required"))?;
    state.groups.add_member(group, device)?;
    message("Device added to group")
}

pub async fn remove_group_device_handler(
    State(state): State<ServerState>,
    Path((id, device_id)): Path<(String, String)>,
) -> HandlerResult<Value> {
    let group: GroupId = extract_path(&id)?;
    let device: DeviceId = extract_path(&device_id)?;
    state.groups.remove_member(group, device)?;
    message("Device removed from group")
}
