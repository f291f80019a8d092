//! Tests for the action-multiplexed remote endpoint.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use irhub_api::handlers::remote::*;
use irhub_commands::{TransmitOutcome, UnreachableReason};
use irhub_core::prelude::*;
use serde_json::Value;

use crate::common::create_test_context;

fn action(name: &str) -> Query<RemoteQuery> {
    Query(RemoteQuery {
        action: Some(name.to_string()),
        limit: None,
    })
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_devices_action() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    ctx.add_tv();

    let response = remote_get_handler(State(ctx.state.clone()), action("devices"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["devices"].as_array().unwrap().len(), 1);
    assert_eq!(body["devices"][0]["ir_codes"]["power"], "0xA1B2");
}

#[tokio::test]
async fn test_command_action_dispatches_and_records() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();
    ctx.set_endpoint("http://relay.local/send");

    let body = Bytes::from(format!(
        r#"{{"device_id": "{}", "command": "power"}}"#,
        device.id
    ));
    let response = remote_post_handler(State(ctx.state.clone()), action("command"), Ok(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["success"], true);
    assert_eq!(report["ir_code"], "0xA1B2");
    assert_eq!(report["device"], "Living room TV");
    assert_eq!(ctx.transmitter.sent.lock().unwrap().len(), 1);

    let response = remote_get_handler(State(ctx.state.clone()), action("history"))
        .await
        .unwrap();
    let history = body_json(response).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["command"], "power");
    assert_eq!(entries[0]["success"], true);
    assert_eq!(entries[0]["device_name"], "Living room TV");
    assert_eq!(entries[0]["device_type"], "tv");
}

#[tokio::test]
async fn test_command_delivery_failure_is_200() {
    let ctx = create_test_context(TransmitOutcome::Unreachable(UnreachableReason::Timeout));
    let device = ctx.add_tv();
    ctx.set_endpoint("http://relay.local/send");

    let body = Bytes::from(format!(r#"{{"device_id": {}, "command": "power"}}"#, device.id));
    let response = remote_post_handler(State(ctx.state.clone()), action("command"), Ok(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["success"], false);
    assert_eq!(report["message"], "Timeout connecting to IR device");
    assert_eq!(ctx.store.recent(50).unwrap().len(), 1);
}

#[tokio::test]
async fn test_command_missing_fields() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let err = remote_post_handler(State(ctx.state.clone()), action("command"), Ok(Bytes::new()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "device_id and command are required");
}

#[tokio::test]
async fn test_command_unknown_device() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let body = Bytes::from_static(br#"{"device_id": 404, "command": "power"}"#);
    let err = remote_post_handler(State(ctx.state.clone()), action("command"), Ok(body))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Device not found");
    assert!(ctx.store.recent(50).unwrap().is_empty());
}

#[tokio::test]
async fn test_add_device_is_online() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let body = Bytes::from_static(br#"{"name": "Kitchen AC", "type": "ac", "brand": "Daikin"}"#);
    let response = remote_post_handler(State(ctx.state.clone()), action("add_device"), Ok(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["message"], "Device added successfully");
    let id = DeviceId::new(created["id"].as_u64().unwrap());

    let device = ctx.store.get_device(id).unwrap().unwrap();
    assert_eq!(device.status, DeviceStatus::Online);
    assert_eq!(device.device_type, "ac");
    assert!(device.ir_codes.is_empty());
}

#[tokio::test]
async fn test_history_limit() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();
    for _ in 0..3 {
        ctx.store.record(device.id, "power", true).unwrap();
    }

    let query = Query(RemoteQuery {
        action: Some("history".to_string()),
        limit: Some("2".to_string()),
    });
    let response = remote_get_handler(State(ctx.state.clone()), query)
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["history"].as_array().unwrap().len(), 2);

    let query = Query(RemoteQuery {
        action: Some("history".to_string()),
        limit: Some("lots".to_string()),
    });
    let err = remote_get_handler(State(ctx.state.clone()), query)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_history_limit_uses_configured_default() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();
    for _ in 0..5 {
        ctx.store.record(device.id, "power", true).unwrap();
    }
    let state = ctx.state.clone().with_history_limit(2);

    for limit in [None, Some("0".to_string())] {
        let query = Query(RemoteQuery {
            action: Some("history".to_string()),
            limit,
        });
        let response = remote_get_handler(State(state.clone()), query)
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_groups_action() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();
    let group = ctx.store.create_group("Living room", Some("sofa")).unwrap();
    ctx.store.add_member(group.id, device.id).unwrap();
    ctx.store.create_group("Empty", None).unwrap();

    let response = remote_get_handler(State(ctx.state.clone()), action("groups"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["devices"][0]["name"], "Living room TV");
    assert_eq!(groups[0]["devices"][0]["type"], "tv");
    assert_eq!(groups[1]["devices"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_action_is_not_found() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let err = remote_get_handler(State(ctx.state.clone()), action("reboot"))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Endpoint not found");

    let err = remote_post_handler(State(ctx.state.clone()), action("devices"), Ok(Bytes::new()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let err = remote_get_handler(State(ctx.state.clone()), Query(RemoteQuery::default()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}
