// Common types and utilities shared across the application

pub mod errors;
pub mod keys;

pub use errors::{ApiError, ApiResult};
pub use keys::{ConferenceKey, SessionKey, UserId};
