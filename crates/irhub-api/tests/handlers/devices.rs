//! Tests for device handlers.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use irhub_api::handlers::devices::*;
use irhub_api::models::DeviceRequest;
use irhub_core::DeviceStatus;

use crate::common::create_test_server_state;

fn named(name: &str) -> DeviceRequest {
    DeviceRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let state = create_test_server_state();

    let (status, Json(device)) = create_device_handler(State(state.clone()), Ok(Json(named("TV"))))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(device.name, "TV");
    assert_eq!(device.model, "");
    assert_eq!(device.device_type, "tv");
    assert_eq!(device.brand, "");
    assert_eq!(device.status, DeviceStatus::Offline);
    assert!(device.ir_codes.is_empty());

    let Json(loaded) = get_device_handler(State(state), Path(device.id.to_string()))
        .await
        .unwrap();
    assert_eq!(loaded, device);
}

#[tokio::test]
async fn test_create_without_name_is_bad_request() {
    let state = create_test_server_state();
    let err = create_device_handler(State(state), Ok(Json(DeviceRequest::default())))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_newest_first() {
    let state = create_test_server_state();
    for name in ["A", "B"] {
        let (status, _) = create_device_handler(State(state.clone()), Ok(Json(named(name))))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    let Json(devices) = list_devices_handler(State(state)).await.unwrap();
    let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[tokio::test]
async fn test_update_with_body_id() {
    let state = create_test_server_state();
    let (_, Json(device)) = create_device_handler(State(state.clone()), Ok(Json(named("TV"))))
        .await
        .unwrap();

    let mut codes = BTreeMap::new();
    codes.insert("power".to_string(), "0x01".to_string());
    let req = DeviceRequest {
        id: Some(device.id),
        name: Some("Bedroom TV".to_string()),
        status: Some("online".to_string()),
        ir_codes: Some(codes),
        ..Default::default()
    };
    let Json(updated) = update_device_handler(State(state), Ok(Json(req)))
        .await
        .unwrap();

    assert_eq!(updated.id, device.id);
    assert_eq!(updated.name, "Bedroom TV");
    assert_eq!(updated.status, DeviceStatus::Online);
    assert_eq!(updated.ir_code("power"), Some("0x01"));
    assert_eq!(updated.created_at, device.created_at);
}

#[tokio::test]
async fn test_update_without_id_is_bad_request() {
    let state = create_test_server_state();
    let err = update_device_handler(State(state), Ok(Json(named("TV"))))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Device ID is required");
}

#[tokio::test]
async fn test_update_missing_device_is_not_found() {
    let state = create_test_server_state();
    let err = update_device_by_path_handler(
        State(state.clone()),
        Path("77".to_string()),
        Ok(Json(named("TV"))),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let Json(devices) = list_devices_handler(State(state)).await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let state = create_test_server_state();
    let (_, Json(device)) = create_device_handler(State(state.clone()), Ok(Json(named("TV"))))
        .await
        .unwrap();

    let query = DeviceIdQuery {
        id: Some(device.id.to_string()),
    };
    let Json(body) = delete_device_handler(State(state.clone()), Query(query))
        .await
        .unwrap();
    assert_eq!(body["message"], "Device deleted successfully");

    let err = delete_device_by_path_handler(State(state), Path(device.id.to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let state = create_test_server_state();
    let err = delete_device_handler(State(state), Query(DeviceIdQuery::default()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let state = create_test_server_state();
    let err = get_device_handler(State(state), Path("tv".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}
