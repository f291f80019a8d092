//! Application router configuration.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{delete, get, post, MethodRouter};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use super::state::ServerState;
use crate::handlers::{basic, devices, groups, ir, remote, settings};

/// Maximum accepted request body (1 MiB). Oversized bodies get a JSON 413
/// from the extractors.
pub const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// Give a route a JSON 405 for verbs it does not handle.
fn json_405(route: MethodRouter<ServerState>) -> MethodRouter<ServerState> {
    route.fallback(basic::method_not_allowed_handler)
}

/// Create the application router with a specific state.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", json_405(get(basic::health_handler)))
        // Devices
        .route(
            "/api/devices",
            json_405(
                get(devices::list_devices_handler)
                    .post(devices::create_device_handler)
                    .put(devices::update_device_handler)
                    .delete(devices::delete_device_handler),
            ),
        )
        .route(
            "/api/devices/:id",
            json_405(
                get(devices::get_device_handler)
                    .put(devices::update_device_by_path_handler)
                    .delete(devices::delete_device_by_path_handler),
            ),
        )
        // Action endpoint
        .route(
            "/api/remote",
            json_405(get(remote::remote_get_handler).post(remote::remote_post_handler)),
        )
        // IR
        .route("/api/ir/send", json_405(post(ir::send_ir_handler)))
        .route("/api/ir/learn", json_405(post(ir::learn_ir_handler)))
        // Settings
        .route(
            "/api/settings",
            json_405(get(settings::get_settings_handler).put(settings::update_settings_handler)),
        )
        // Groups
        .route(
            "/api/groups",
            json_405(get(groups::list_groups_handler).post(groups::create_group_handler)),
        )
        .route("/api/groups/:id", json_405(delete(groups::delete_group_handler)))
        .route(
            "/api/groups/:id/devices",
            json_405(post(groups::add_group_device_handler)),
        )
        .route(
            "/api/groups/:id/devices/:device_id",
            json_405(delete(groups::remove_group_device_handler)),
        )
        .fallback(basic::not_found_handler)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
}
