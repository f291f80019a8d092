//! HTTP API for irhub.
//!
//! An axum router over the device, settings, group and history stores, with
//! command dispatch through `irhub-commands`. Success bodies are plain JSON;
//! errors use `{"success": false, "error": {"code", "message"}}`.

pub mod handlers;
pub mod models;
pub mod server;

pub use models::ErrorResponse;
pub use server::{create_router, run, ServerState};
