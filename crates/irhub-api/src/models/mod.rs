//! API data models.

pub mod error;
pub mod requests;

pub use error::{ApiResult, ErrorResponse};
pub use requests::{CommandBody, DeviceRequest, GroupMemberRequest, GroupRequest, LearnBody};
