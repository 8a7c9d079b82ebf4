//! Scalar values: get, set, set_ex, incr, decr.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CacheError, Result};
use crate::facade::CacheFacade;

impl CacheFacade {
    /// Reads the value under `key`, or None if the key is absent.
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        let key = self.client.key(key)?;
        match self.client.backend().get(&key).await? {
            Some(bytes) => Ok(Some(self.client.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Writes `value` under `key`, replacing any previous value and expiry.
    pub async fn set<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> Result<()> {
        let key = self.client.key(key)?;
        let value = self.client.encode(value)?;
        self.client.backend().set(&key, value, None).await
    }

    /// Writes `value` under `key` with an expiry of `ttl` (whole seconds, at least one).
    pub async fn set_ex<V: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &V,
        ttl: Duration,
    ) -> Result<()> {
        let key = self.client.key(key)?;
        let value = self.client.encode(value)?;
        let seconds = ttl.as_secs().max(1);
        self.client.backend().set(&key, value, Some(seconds)).await
    }

    /// Increments the integer under `key` by `delta` and returns the result.
    ///
    /// An absent key counts as zero. `delta` must be positive.
    pub async fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        if delta <= 0 {
            return Err(CacheError::InvalidRequest(
                "Increment must be greater than 0".to_string(),
            ));
        }
        let key = self.client.key(key)?;
        self.client.backend().incr_by(&key, delta).await
    }

    /// Decrements the integer under `key` by `delta` and returns the result.
    ///
    /// An absent key counts as zero. `delta` must be positive.
    pub async fn decr(&self, key: &str, delta: i64) -> Result<i64> {
        if delta <= 0 {
            return Err(CacheError::InvalidRequest(
                "Decrement must be greater than 0".to_string(),
            ));
        }
        let key = self.client.key(key)?;
        self.client.backend().incr_by(&key, -delta).await
    }
}
