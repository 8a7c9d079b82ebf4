//! Cache Client Module
//!
//! The shared client handle: one store backend bound to the key codec and
//! the value codec. Built once at startup and cloned into every handler.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::codec::{JsonCodec, StringCodec};
use crate::error::{CacheError, Result};
use crate::store::{CacheBackend, MemoryStore, RedisStore};

// == Cache Client ==
/// Store handle with its serialization settings.
///
/// Keys and hash field names use [`StringCodec`]; values, list elements and
/// hash field values all use the same [`JsonCodec`]. The client holds no
/// mutable state, so clones can be shared freely across tasks.
#[derive(Clone)]
pub struct CacheClient {
    backend: Arc<dyn CacheBackend>,
    keys: StringCodec,
    values: JsonCodec,
}

impl CacheClient {
    // == Constructors ==
    /// Creates a client over an existing backend.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            keys: StringCodec,
            values: JsonCodec,
        }
    }

    /// Connects to the Redis server at `url`.
    ///
    /// Fails if the server cannot be reached.
    pub async fn redis(url: &str) -> Result<Self> {
        let store = RedisStore::connect(url).await?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Creates a client over an in-process store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self::new(store)
    }

    // == Accessors ==
    /// Returns the backend commands are sent to.
    pub fn backend(&self) -> &dyn CacheBackend {
        self.backend.as_ref()
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<()> {
        self.backend.ping().await
    }

    // == Encoding ==
    /// Encodes a key, rejecting empty ones.
    pub fn key(&self, key: &str) -> Result<Vec<u8>> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        }
        Ok(self.keys.encode(key))
    }

    /// Encodes a hash field name.
    pub fn field(&self, field: &str) -> Vec<u8> {
        self.keys.encode(field)
    }

    /// Decodes a hash field name read back from the store.
    pub fn decode_field(&self, bytes: &[u8]) -> Result<String> {
        self.keys.decode(bytes)
    }

    /// Encodes a value with the JSON codec.
    pub fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<Vec<u8>> {
        self.values.encode(value)
    }

    /// Decodes a value with the JSON codec.
    pub fn decode<V: DeserializeOwned>(&self, bytes: &[u8]) -> Result<V> {
        self.values.decode(bytes)
    }
}

impl std::fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("keys", &self.keys)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
