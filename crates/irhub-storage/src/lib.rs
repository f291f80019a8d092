//! Persistent storage for irhub, backed by redb.
//!
//! [`RemoteStore`] keeps devices, settings, groups and command history in a
//! single database file and implements every storage trait from
//! `irhub-core`.

pub mod error;
pub mod store;

mod devices;
mod groups;
mod history;
mod settings;

pub use error::{Error, Result};
pub use store::RemoteStore;
