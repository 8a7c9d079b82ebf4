//! listcache - A typed list cache over Redis
//!
//! Provides a JSON-serializing client handle, a typed facade for list, hash
//! and scalar operations, and a small demo HTTP surface.

pub mod api;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use client::CacheClient;
pub use codec::CacheValue;
pub use config::{BackendKind, Config, ListWriteMode};
pub use error::{CacheError, Result};
pub use facade::{CacheFacade, KeyTtl};
pub use tasks::spawn_cleanup_task;
