//! Settings handlers.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use irhub_core::model::setting_value_to_string;

use super::common::{json_body, message, ok, HandlerResult};
use super::ServerState;

/// All settings as a key-ordered map.
pub async fn get_settings_handler(
    State(state): State<ServerState>,
) -> HandlerResult<BTreeMap<String, String>> {
    ok(state.settings.all_settings()?)
}

/// Upsert every key in the body. Non-string values are stored as JSON text.
pub async fn update_settings_handler(
    State(state): State<ServerState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> HandlerResult<Value> {
    let entries: BTreeMap<String, String> = json_body(payload)?
        .iter()
        .map(|(key, value)| (key.clone(), setting_value_to_string(value)))
        .collect();
    state.settings.upsert_settings(&entries)?;
    message("Settings updated successfully")
}
