//! Response models for the HTTP surface
//!
//! JSON bodies for the health endpoint and for error responses.

pub mod responses;

pub use responses::{ErrorResponse, HealthResponse};
