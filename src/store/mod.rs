//! Store Module
//!
//! Byte-level access to the key-value store behind the cache client.
//!
//! [`CacheBackend`] is the seam between the typed facade and the store.
//! [`RedisStore`] talks to a remote Redis server; [`MemoryStore`] keeps
//! the same command semantics in process.

mod entry;
mod memory;
mod remote;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::{expiry_deadline, CacheEntry, StoredValue};
pub use memory::MemoryStore;
pub use remote::RedisStore;

// == Redis-Compatible Error Messages ==
/// Reported when a command is used against a key of another type.
pub const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";
/// Reported by `LSET` when the index is outside the list.
pub const INDEX_OUT_OF_RANGE: &str = "ERR index out of range";
/// Reported by `LSET` when the key does not exist.
pub const NO_SUCH_KEY: &str = "ERR no such key";
/// Reported by `INCRBY` / `HINCRBY` when the stored value is not an integer.
pub const NOT_AN_INTEGER: &str = "ERR value is not an integer or out of range";

// == Cache Backend ==
/// Commands the cache client issues against a store.
///
/// Keys, fields and values are already encoded. Return values follow the
/// Redis reply for the command of the same name.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Checks that the store answers.
    async fn ping(&self) -> Result<()>;

    // Keys
    async fn exists(&self, key: &[u8]) -> Result<bool>;
    async fn del(&self, keys: &[Vec<u8>]) -> Result<usize>;
    async fn expire(&self, key: &[u8], seconds: u64) -> Result<bool>;
    /// Remaining TTL in seconds: `-2` if the key is missing, `-1` if it never expires.
    async fn ttl(&self, key: &[u8]) -> Result<i64>;

    // Strings
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &[u8], value: Vec<u8>, ttl_seconds: Option<u64>) -> Result<()>;
    async fn incr_by(&self, key: &[u8], delta: i64) -> Result<i64>;

    // Hashes
    async fn hget(&self, key: &[u8], field: &[u8]) -> Result<Option<Vec<u8>>>;
    /// Returns true if the field did not exist before.
    async fn hset(&self, key: &[u8], field: Vec<u8>, value: Vec<u8>) -> Result<bool>;
    async fn hset_multiple(&self, key: &[u8], entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()>;
    async fn hgetall(&self, key: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
    async fn hdel(&self, key: &[u8], fields: &[Vec<u8>]) -> Result<usize>;
    async fn hexists(&self, key: &[u8], field: &[u8]) -> Result<bool>;
    async fn hincr_by(&self, key: &[u8], field: &[u8], delta: i64) -> Result<i64>;

    // Lists
    /// Pushes onto the tail and returns the new length.
    async fn rpush(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize>;
    /// Atomically deletes the key and pushes `items`; returns the new length.
    async fn replace_list(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize>;
    async fn llen(&self, key: &[u8]) -> Result<usize>;
    async fn lrange(&self, key: &[u8], start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;
    async fn lindex(&self, key: &[u8], index: isize) -> Result<Option<Vec<u8>>>;
    async fn lset(&self, key: &[u8], index: isize, value: Vec<u8>) -> Result<()>;
    /// Removes matches of `value`; the sign of `count` picks the scan direction.
    async fn lrem(&self, key: &[u8], count: isize, value: &[u8]) -> Result<usize>;
}
