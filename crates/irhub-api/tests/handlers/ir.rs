//! Tests for IR send/learn handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use irhub_api::handlers::ir::*;
use irhub_api::models::{CommandBody, LearnBody};
use irhub_commands::TransmitOutcome;
use irhub_core::prelude::*;

use crate::common::create_test_context;

#[tokio::test]
async fn test_send_without_endpoint() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();

    let body = CommandBody {
        device_id: Some(device.id),
        command: Some("power".to_string()),
    };
    let Json(report) = send_ir_handler(State(ctx.state.clone()), Ok(Json(body)))
        .await
        .unwrap();

    assert!(!report.success);
    assert_eq!(report.message, "IR endpoint not configured in settings");
    assert_eq!(report.ir_code, "0xA1B2");

    let history = ctx.store.recent(50).unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].success);
}

#[tokio::test]
async fn test_send_unsupported_command() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();
    ctx.set_endpoint("http://relay.local/send");

    let body = CommandBody {
        device_id: Some(device.id),
        command: Some("netflix".to_string()),
    };
    let err = send_ir_handler(State(ctx.state.clone()), Ok(Json(body)))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Command netflix not found for device");
    assert!(ctx.store.recent(50).unwrap().is_empty());
    assert!(ctx.transmitter.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_learn_then_get() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();

    let body = LearnBody {
        device_id: Some(device.id),
        button: Some("mute".to_string()),
        ir_code: Some("0xFF00".to_string()),
    };
    let Json(response) = learn_ir_handler(State(ctx.state.clone()), Ok(Json(body)))
        .await
        .unwrap();

    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "IR code for mute saved successfully");
    assert_eq!(response["button"], "mute");
    assert_eq!(response["ir_code"], "0xFF00");

    let device = ctx.store.get_device(device.id).unwrap().unwrap();
    assert_eq!(device.ir_code("mute"), Some("0xFF00"));
    assert_eq!(device.ir_code("power"), Some("0xA1B2"));
}

#[tokio::test]
async fn test_learn_missing_fields() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let body = LearnBody {
        device_id: Some(DeviceId::new(1)),
        button: Some("mute".to_string()),
        ir_code: None,
    };
    let err = learn_ir_handler(State(ctx.state.clone()), Ok(Json(body)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Missing required fields: device_id, button, ir_code");
}

#[tokio::test]
async fn test_learn_unknown_device() {
    let ctx = create_test_context(TransmitOutcome::Delivered);

    let body = LearnBody {
        device_id: Some(DeviceId::new(5)),
        button: Some("mute".to_string()),
        ir_code: Some("0xFF00".to_string()),
    };
    let err = learn_ir_handler(State(ctx.state.clone()), Ok(Json(body)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Device not found");
}
