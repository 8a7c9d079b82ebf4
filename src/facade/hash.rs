//! Hash entries: hget, hset, hmset, hgetall, hdel, hexists, hincr.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::facade::CacheFacade;

impl CacheFacade {
    /// Reads one field of the hash under `key`.
    pub async fn hget<V: DeserializeOwned>(&self, key: &str, field: &str) -> Result<Option<V>> {
        let key = self.client.key(key)?;
        let field = self.client.field(field);
        match self.client.backend().hget(&key, &field).await? {
            Some(bytes) => Ok(Some(self.client.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Writes one field; returns true if the field is new.
    pub async fn hset<V: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &V,
    ) -> Result<bool> {
        let key = self.client.key(key)?;
        let field = self.client.field(field);
        let value = self.client.encode(value)?;
        self.client.backend().hset(&key, field, value).await
    }

    /// Writes several fields at once.
    pub async fn hmset<'a, V, I>(&self, key: &str, entries: I) -> Result<()>
    where
        V: Serialize + 'a,
        I: IntoIterator<Item = (&'a str, &'a V)>,
    {
        let key = self.client.key(key)?;
        let encoded = entries
            .into_iter()
            .map(|(field, value)| -> Result<(Vec<u8>, Vec<u8>)> {
                Ok((self.client.field(field), self.client.encode(value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.client.backend().hset_multiple(&key, encoded).await
    }

    /// Reads every field of the hash; an absent key gives an empty map.
    pub async fn hgetall<V: DeserializeOwned>(&self, key: &str) -> Result<HashMap<String, V>> {
        let key = self.client.key(key)?;
        self.client
            .backend()
            .hgetall(&key)
            .await?
            .into_iter()
            .map(|(field, bytes)| -> Result<(String, V)> {
                Ok((self.client.decode_field(&field)?, self.client.decode(&bytes)?))
            })
            .collect()
    }

    /// Deletes fields and returns how many existed.
    pub async fn hdel(&self, key: &str, fields: &[&str]) -> Result<usize> {
        let key = self.client.key(key)?;
        let fields: Vec<Vec<u8>> = fields.iter().map(|f| self.client.field(f)).collect();
        self.client.backend().hdel(&key, &fields).await
    }

    /// Returns true if the hash has the field.
    pub async fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        let key = self.client.key(key)?;
        let field = self.client.field(field);
        self.client.backend().hexists(&key, &field).await
    }

    /// Adds `delta` to an integer field (absent counts as zero); returns the result.
    pub async fn hincr(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let key = self.client.key(key)?;
        let field = self.client.field(field);
        self.client.backend().hincr_by(&key, &field, delta).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::codec::CacheValue;
    use crate::config::ListWriteMode;
    use crate::facade::test_support::memory_facade;

    #[tokio::test]
    async fn test_hset_and_hget() {
        let cache = memory_facade(ListWriteMode::Append);

        let tags = CacheValue::List(vec![CacheValue::from("a"), CacheValue::from("b")]);
        assert!(cache.hset("h", "tags", &tags).await.unwrap());
        assert!(!cache.hset("h", "tags", &tags).await.unwrap());

        let read: Option<CacheValue> = cache.hget("h", "tags").await.unwrap();
        assert_eq!(read, Some(tags));

        let missing: Option<CacheValue> = cache.hget("h", "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_hmset_and_hgetall() {
        let cache = memory_facade(ListWriteMode::Append);

        let name = CacheValue::from("嘤嘤嘤");
        let age = CacheValue::Int(7);
        cache
            .hmset("h", [("name", &name), ("age", &age)])
            .await
            .unwrap();

        let all: HashMap<String, CacheValue> = cache.hgetall("h").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["name"], name);
        assert_eq!(all["age"], age);

        let empty: HashMap<String, CacheValue> = cache.hgetall("none").await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_hdel_hexists_hincr() {
        let cache = memory_facade(ListWriteMode::Append);

        cache.hset("h", "n", &CacheValue::Int(1)).await.unwrap();
        assert_eq!(cache.hincr("h", "n", 4).await.unwrap(), 5);
        assert_eq!(cache.hincr("h", "m", -2).await.unwrap(), -2);

        assert!(cache.hexists("h", "n").await.unwrap());
        assert_eq!(cache.hdel("h", &["n", "x"]).await.unwrap(), 1);
        assert!(!cache.hexists("h", "n").await.unwrap());

        let read: Option<CacheValue> = cache.hget("h", "m").await.unwrap();
        assert_eq!(read, Some(CacheValue::Int(-2)));
    }
}
