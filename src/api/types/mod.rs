//! Shared API types
//!
//! The response envelope plus extractors that keep rejection errors in
//! the same JSON shape as every other response.

pub mod envelope;
pub mod json;
pub mod query;

pub use envelope::{ApiError, ApiResponse, SUCCESS_MESSAGE};
pub use json::Json;
pub use query::Query;
