//! Redis Store Module
//!
//! Backend that forwards every command to a remote Redis server.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::Result;
use crate::store::CacheBackend;

/// Upper bound on establishing the initial connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// == Redis Store ==
/// Redis-backed store sharing one multiplexed, auto-reconnecting connection.
///
/// Cloning is cheap; all clones share the same connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Opens a connection to the server at `url`.
    ///
    /// Fails with `StoreUnavailable` as soon as the first attempt fails.
    /// Once connected, the manager reconnects on its own after drops.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(CONNECT_TIMEOUT);
        let connection = ConnectionManager::new_with_config(client, config).await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { connection })
    }

    fn conn(&self) -> ConnectionManager {
        self.connection.clone()
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheBackend for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }

    // == Keys ==
    async fn exists(&self, key: &[u8]) -> Result<bool> {
        Ok(self.conn().exists(key).await?)
    }

    async fn del(&self, keys: &[Vec<u8>]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        Ok(self.conn().del(keys).await?)
    }

    async fn expire(&self, key: &[u8], seconds: u64) -> Result<bool> {
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        Ok(self.conn().expire(key, seconds).await?)
    }

    async fn ttl(&self, key: &[u8]) -> Result<i64> {
        Ok(self.conn().ttl(key).await?)
    }

    // == Strings ==
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.conn().get(key).await?)
    }

    async fn set(&self, key: &[u8], value: Vec<u8>, ttl_seconds: Option<u64>) -> Result<()> {
        let mut conn = self.conn();
        match ttl_seconds {
            Some(seconds) => conn.set_ex::<_, _, ()>(key, value, seconds).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn incr_by(&self, key: &[u8], delta: i64) -> Result<i64> {
        Ok(self.conn().incr(key, delta).await?)
    }

    // == Hashes ==
    async fn hget(&self, key: &[u8], field: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.conn().hget(key, field).await?)
    }

    async fn hset(&self, key: &[u8], field: Vec<u8>, value: Vec<u8>) -> Result<bool> {
        let added: i64 = self.conn().hset(key, field, value).await?;
        Ok(added > 0)
    }

    async fn hset_multiple(&self, key: &[u8], entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.conn()
            .hset_multiple::<_, _, _, ()>(key, entries.as_slice())
            .await?;
        Ok(())
    }

    async fn hgetall(&self, key: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self.conn().hgetall(key).await?)
    }

    async fn hdel(&self, key: &[u8], fields: &[Vec<u8>]) -> Result<usize> {
        if fields.is_empty() {
            return Ok(0);
        }
        Ok(self.conn().hdel(key, fields).await?)
    }

    async fn hexists(&self, key: &[u8], field: &[u8]) -> Result<bool> {
        Ok(self.conn().hexists(key, field).await?)
    }

    async fn hincr_by(&self, key: &[u8], field: &[u8], delta: i64) -> Result<i64> {
        Ok(self.conn().hincr(key, field, delta).await?)
    }

    // == Lists ==
    async fn rpush(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize> {
        if items.is_empty() {
            return self.llen(key).await;
        }
        Ok(self.conn().rpush(key, items).await?)
    }

    async fn replace_list(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize> {
        let mut conn = self.conn();
        if items.is_empty() {
            conn.del::<_, ()>(key).await?;
            return Ok(0);
        }
        let (len,): (usize,) = redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .rpush(key, items)
            .query_async(&mut conn)
            .await?;
        Ok(len)
    }

    async fn llen(&self, key: &[u8]) -> Result<usize> {
        Ok(self.conn().llen(key).await?)
    }

    async fn lrange(&self, key: &[u8], start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        Ok(self.conn().lrange(key, start, stop).await?)
    }

    async fn lindex(&self, key: &[u8], index: isize) -> Result<Option<Vec<u8>>> {
        Ok(self.conn().lindex(key, index).await?)
    }

    async fn lset(&self, key: &[u8], index: isize, value: Vec<u8>) -> Result<()> {
        self.conn().lset::<_, _, ()>(key, index, value).await?;
        Ok(())
    }

    async fn lrem(&self, key: &[u8], count: isize, value: &[u8]) -> Result<usize> {
        Ok(self.conn().lrem(key, count, value).await?)
    }
}
