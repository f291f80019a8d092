//! API handlers organized by domain.

pub mod basic;
pub mod common;
pub mod devices;
pub mod groups;
pub mod ir;
pub mod remote;
pub mod settings;

// Re-export ServerState so handlers can use it
pub use crate::server::ServerState;

pub use basic::health_handler;
