//! Action-multiplexed remote endpoint: `/api/remote?action=...`.
//!
//! Reads: `devices`, `history`, `groups`. Writes: `command`, `add_device`.
//! Any other action, or an action used with the wrong verb, is a 404.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use irhub_core::config::clamp_history_limit;
use irhub_core::DeviceStatus;

use super::common::{extract_path, parse_body, ExtractResult};
use super::ServerState;
use crate::models::{CommandBody, DeviceRequest, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
pub struct RemoteQuery {
    pub action: Option<String>,
    pub limit: Option<String>,
}

fn history_limit(state: &ServerState, raw: Option<&str>) -> ExtractResult<usize> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match extract_path::<usize>(raw)? {
            0 => Ok(state.history_limit),
            n => Ok(clamp_history_limit(Some(n))),
        },
        None => Ok(state.history_limit),
    }
}

pub async fn remote_get_handler(
    State(state): State<ServerState>,
    Query(query): Query<RemoteQuery>,
) -> Result<Response, ErrorResponse> {
    match query.action.as_deref() {
        Some("devices") => {
            let devices = state.devices.list_devices()?;
            Ok(Json(json!({ "devices": devices })).into_response())
        }
        Some("history") => {
            let limit = history_limit(&state, query.limit.as_deref())?;
            let history = state.history.recent(limit)?;
            Ok(Json(json!({ "history": history })).into_response())
        }
        Some("groups") => {
            let groups = state.groups.list_groups()?;
            Ok(Json(json!({ "groups": groups })).into_response())
        }
        _ => Err(ErrorResponse::not_found("Endpoint")),
    }
}

pub async fn remote_post_handler(
    State(state): State<ServerState>,
    Query(query): Query<RemoteQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ErrorResponse> {
    let body = body?;
    match query.action.as_deref() {
        Some("command") => {
            let request = parse_body::<CommandBody>(&body)?.into_request()?;
            let report = state.dispatcher.dispatch(&request).await?;
            Ok(Json(report).into_response())
        }
        Some("add_device") => {
            let fields = parse_body::<DeviceRequest>(&body)?.into_fields(DeviceStatus::Online)?;
            let device = state.devices.create_device(fields)?;
            Ok((
                StatusCode::CREATED,
                Json(json!({ "id": device.id, "message": "Device added successfully" })),
            )
                .into_response())
        }
        _ => Err(ErrorResponse::not_found("Endpoint")),
    }
}
