//! Device CRUD handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use irhub_core::{Device, DeviceId, DeviceStatus};

use super::common::{created, extract_path, json_body, message, ok, CreatedResult, HandlerResult};
use super::ServerState;
use crate::models::{DeviceRequest, ErrorResponse};

/// `?id=` query for the body-less delete.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceIdQuery {
    pub id: Option<String>,
}

fn required_id(id: Option<DeviceId>) -> Result<DeviceId, ErrorResponse> {
    id.ok_or_else(|| ErrorResponse::bad_request("Device ID is required"))
}

/// List all devices, newest first.
pub async fn list_devices_handler(State(state): State<ServerState>) -> HandlerResult<Vec<Device>> {
    ok(state.devices.list_devices()?)
}

pub async fn get_device_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<Device> {
    let id: DeviceId = extract_path(&id)?;
    let device = state
        .devices
        .get_device(id)?
        .ok_or_else(|| ErrorResponse::not_found("Device"))?;
    ok(device)
}

pub async fn create_device_handler(
    State(state): State<ServerState>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> CreatedResult<Device> {
    let fields = json_body(payload)?.into_fields(DeviceStatus::Offline)?;
    created(state.devices.create_device(fields)?)
}

/// Update with the id carried in the body.
pub async fn update_device_handler(
    State(state): State<ServerState>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> HandlerResult<Device> {
    let req = json_body(payload)?;
    let id = required_id(req.id)?;
    let fields = req.into_fields(DeviceStatus::Offline)?;
    ok(state.devices.update_device(id, fields)?)
}

pub async fn update_device_by_path_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> HandlerResult<Device> {
    let id: DeviceId = extract_path(&id)?;
    let fields = json_body(payload)?.into_fields(DeviceStatus::Offline)?;
    ok(state.devices.update_device(id, fields)?)
}

/// Delete with the id given as `?id=`.
pub async fn delete_device_handler(
    State(state): State<ServerState>,
    Query(query): Query<DeviceIdQuery>,
) -> HandlerResult<Value> {
    let id = match query.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<DeviceId>()?,
        None => return Err(ErrorResponse::bad_request("Device ID is required")),
    };
    state.devices.delete_device(id)?;
    message("Device deleted successfully")
}

pub async fn delete_device_by_path_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let id: DeviceId = extract_path(&id)?;
    state.devices.delete_device(id)?;
    message("Device deleted successfully")
}
