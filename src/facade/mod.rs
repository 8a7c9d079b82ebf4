//! Cache Facade Module
//!
//! Typed convenience operations over the shared [`CacheClient`].
//!
//! Operations are grouped by the kind of value they address:
//! - keys: expire, ttl, exists, delete
//! - values: get, set, set_ex, incr, decr
//! - hashes: hget, hset, hmset, hgetall, hdel, hexists, hincr
//! - lists: list_set, list_push, list_size, list_get, list_get_index,
//!   list_update_index, list_remove
//!
//! The facade keeps no state between calls and never retries; store errors
//! propagate to the caller unchanged.

mod hash;
mod keys;
mod list;
mod values;


use std::time::Duration;

use crate::client::CacheClient;
use crate::config::ListWriteMode;

// == Key TTL ==
/// Expiry state of a key, as reported by `TTL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist
    Missing,
    /// The key exists and never expires
    Persistent,
    /// The key expires after the given duration
    Expires(Duration),
}

impl KeyTtl {
    /// Converts a raw `TTL` reply (`-2`, `-1` or seconds) into a KeyTtl.
    pub fn from_reply(seconds: i64) -> Self {
        match seconds {
            -2 => KeyTtl::Missing,
            s if s < 0 => KeyTtl::Persistent,
            s => KeyTtl::Expires(Duration::from_secs(s as u64)),
        }
    }
}

// == Cache Facade ==
/// Typed operations on scalars, hashes and lists stored under string keys.
#[derive(Debug, Clone)]
pub struct CacheFacade {
    client: CacheClient,
    list_write_mode: ListWriteMode,
}

impl CacheFacade {
    /// Creates a facade over `client`, writing lists with `list_write_mode`.
    pub fn new(client: CacheClient, list_write_mode: ListWriteMode) -> Self {
        Self {
            client,
            list_write_mode,
        }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &CacheClient {
        &self.client
    }

    /// Returns the policy used by `list_set`.
    pub fn list_write_mode(&self) -> ListWriteMode {
        self.list_write_mode
    }
}
