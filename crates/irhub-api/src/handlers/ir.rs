//! IR send and learn handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use irhub_commands::DispatchReport;

use super::common::{json_body, ok, HandlerResult};
use super::ServerState;
use crate::models::{CommandBody, LearnBody};

/// Press a button: resolve, transmit, record.
///
/// Delivery failures are still a 200 with `success: false`.
pub async fn send_ir_handler(
    State(state): State<ServerState>,
    payload: Result<Json<CommandBody>, JsonRejection>,
) -> HandlerResult<DispatchReport> {
    let request = json_body(payload)?.into_request()?;
    ok(state.dispatcher.dispatch(&request).await?)
}

/// Save a learned code for one button. No hardware is involved.
pub async fn learn_ir_handler(
    State(state): State<ServerState>,
    payload: Result<Json<LearnBody>, JsonRejection>,
) -> HandlerResult<Value> {
    let (device_id, button, ir_code) = json_body(payload)?.into_parts()?;
    state.devices.set_ir_code(device_id, &button, &ir_code)?;

    ok(json!({
        "success": true,
        "message": format!("IR code for {} saved successfully", button),
        "button": button,
        "ir_code": ir_code,
    }))
}
