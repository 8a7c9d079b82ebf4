//! Key management: expire, ttl, exists, delete.

use std::time::Duration;

use crate::error::Result;
use crate::facade::{CacheFacade, KeyTtl};

impl CacheFacade {
    /// Sets a key to expire after `ttl` (whole seconds).
    ///
    /// Returns false if the key does not exist.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let key = self.client.key(key)?;
        self.client.backend().expire(&key, ttl.as_secs()).await
    }

    /// Returns the expiry state of a key.
    pub async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let key = self.client.key(key)?;
        let reply = self.client.backend().ttl(&key).await?;
        Ok(KeyTtl::from_reply(reply))
    }

    /// Returns true if the key exists.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let key = self.client.key(key)?;
        self.client.backend().exists(&key).await
    }

    /// Deletes the given keys and returns how many existed.
    pub async fn delete(&self, keys: &[&str]) -> Result<usize> {
        let encoded = keys
            .iter()
            .map(|key| self.client.key(key))
            .collect::<Result<Vec<_>>>()?;
        self.client.backend().del(&encoded).await
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::CacheValue;
    use crate::config::ListWriteMode;
    use crate::error::CacheError;
    use crate::facade::test_support::memory_facade;
    use crate::facade::KeyTtl;
    use std::time::Duration;

    #[tokio::test]
    async fn test_expire_and_ttl() {
        let cache = memory_facade(ListWriteMode::Append);

        assert_eq!(cache.ttl("k").await.unwrap(), KeyTtl::Missing);
        assert!(!cache.expire("k", Duration::from_secs(5)).await.unwrap());

        cache.set("k", &CacheValue::Int(1)).await.unwrap();
        assert_eq!(cache.ttl("k").await.unwrap(), KeyTtl::Persistent);

        assert!(cache.expire("k", Duration::from_secs(60)).await.unwrap());
        match cache.ttl("k").await.unwrap() {
            KeyTtl::Expires(left) => assert!(left <= Duration::from_secs(60)),
            other => panic!("unexpected ttl {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_ttl_fails_without_losing_key() {
        let cache = memory_facade(ListWriteMode::Append);
        let huge = Duration::from_secs(u64::MAX / 10);

        cache.set("k", &CacheValue::Int(1)).await.unwrap();
        assert!(matches!(cache.expire("k", huge).await, Err(CacheError::Store(_))));
        assert_eq!(cache.ttl("k").await.unwrap(), KeyTtl::Persistent);

        let result = cache.set_ex("t", &CacheValue::Int(2), huge).await;
        assert!(matches!(result, Err(CacheError::Store(_))));
        let missing: Option<CacheValue> = cache.get("t").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let cache = memory_facade(ListWriteMode::Append);

        cache.set("a", &CacheValue::from("x")).await.unwrap();
        cache.list_push("b", &CacheValue::from("y")).await.unwrap();

        assert!(cache.exists("a").await.unwrap());
        assert_eq!(cache.delete(&["a", "b", "c"]).await.unwrap(), 2);
        assert!(!cache.exists("a").await.unwrap());
        assert!(!cache.exists("b").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_rejects_empty_key() {
        let cache = memory_facade(ListWriteMode::Append);

        let result = cache.delete(&["a", ""]).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
