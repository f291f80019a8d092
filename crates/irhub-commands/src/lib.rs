//! Command dispatch for irhub.
//!
//! - [`Transmitter`] / [`HttpTransmitter`]: deliver an IR code to the relay
//! - [`CommandDispatcher`]: resolve, transmit and record one command

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod transmitter;

pub use command::{CommandRequest, DispatchReport};
pub use dispatcher::CommandDispatcher;
pub use error::DispatchError;
pub use transmitter::{HttpTransmitter, TransmitOutcome, Transmitter, UnreachableReason};
