//! API Module
//!
//! HTTP handlers and routing for the demo endpoints.
//!
//! # Endpoints
//! - `GET /set` - Write the demo list
//! - `GET /get` - Log the demo list
//! - `GET /del` - Remove one word from the demo list
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
