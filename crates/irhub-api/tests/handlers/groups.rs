//! Tests for group handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use irhub_api::handlers::groups::*;
use irhub_api::models::{GroupMemberRequest, GroupRequest};
use irhub_commands::TransmitOutcome;
use irhub_core::prelude::*;

use crate::common::create_test_context;

#[tokio::test]
async fn test_group_lifecycle() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let device = ctx.add_tv();

    let req = GroupRequest {
        name: Some("Living room".to_string()),
        icon: Some("sofa".to_string()),
    };
    let (status, Json(group)) = create_group_handler(State(ctx.state.clone()), Ok(Json(req)))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let member = GroupMemberRequest {
        device_id: Some(device.id),
    };
    let Json(added) = add_group_device_handler(
        State(ctx.state.clone()),
        Path(group.id.to_string()),
        Ok(Json(member)),
    )
    .await
    .unwrap();
    assert_eq!(added["message"], "Device added to group");

    let Json(groups) = list_groups_handler(State(ctx.state.clone())).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].devices.len(), 1);
    assert_eq!(groups[0].devices[0].id, device.id);

    let Json(removed) = remove_group_device_handler(
        State(ctx.state.clone()),
        Path((group.id.to_string(), device.id.to_string())),
    )
    .await
    .unwrap();
    assert_eq!(removed["message"], "Device removed from group");
    let Json(groups) = list_groups_handler(State(ctx.state.clone())).await.unwrap();
    assert!(groups[0].devices.is_empty());

    let Json(deleted) = delete_group_handler(State(ctx.state.clone()), Path(group.id.to_string()))
        .await
        .unwrap();
    assert_eq!(deleted["message"], "Group deleted successfully");
    let Json(groups) = list_groups_handler(State(ctx.state.clone())).await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_add_unknown_device_to_group() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let group = ctx.store.create_group("Office", None).unwrap();

    let member = GroupMemberRequest {
        device_id: Some(DeviceId::new(31)),
    };
    let err = add_group_device_handler(
        State(ctx.state.clone()),
        Path(group.id.to_string()),
        Ok(Json(member)),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_group_requires_name() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let err = create_group_handler(State(ctx.state.clone()), Ok(Json(GroupRequest::default())))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_group() {
    let ctx = create_test_context(TransmitOutcome::Delivered);
    let err = delete_group_handler(State(ctx.state.clone()), Path("9".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Group not found");
}
