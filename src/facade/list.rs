//! List operations.
//!
//! Lists are ordered, keep duplicates, and are addressed with zero-based
//! indices where negative values count from the tail (`-1` is the last
//! element). Elements are matched for removal by their encoded form.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::ListWriteMode;
use crate::error::Result;
use crate::facade::CacheFacade;

impl CacheFacade {
    // == List Set ==
    /// Writes `items` in order under `key` and returns the resulting length.
    ///
    /// With [`ListWriteMode::Append`] the items are pushed after whatever the
    /// list already holds, so repeated calls accumulate. With
    /// [`ListWriteMode::Replace`] the key is cleared first, atomically.
    ///
    /// An empty `items` leaves the list untouched in append mode and
    /// deletes the key in replace mode.
    pub async fn list_set<V: Serialize>(&self, key: &str, items: &[V]) -> Result<usize> {
        let key = self.client.key(key)?;
        let encoded = items
            .iter()
            .map(|item| self.client.encode(item))
            .collect::<Result<Vec<_>>>()?;

        let len = match self.list_write_mode {
            ListWriteMode::Append => self.client.backend().rpush(&key, encoded).await?,
            ListWriteMode::Replace => self.client.backend().replace_list(&key, encoded).await?,
        };
        debug!(
            "list_set: wrote {} items ({:?}), length now {}",
            items.len(),
            self.list_write_mode,
            len
        );
        Ok(len)
    }

    // == List Push ==
    /// Appends one element and returns the new length.
    pub async fn list_push<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> Result<usize> {
        let key = self.client.key(key)?;
        let value = self.client.encode(value)?;
        self.client.backend().rpush(&key, vec![value]).await
    }

    // == List Size ==
    /// Returns the number of elements, or 0 if the key is absent.
    pub async fn list_size(&self, key: &str) -> Result<usize> {
        let key = self.client.key(key)?;
        self.client.backend().llen(&key).await
    }

    // == List Get ==
    /// Returns the elements from `start` to `end`, both inclusive.
    ///
    /// `end = -1` reads to the end of the list. Out-of-range bounds are
    /// clamped; an empty window or an absent key gives an empty vector.
    pub async fn list_get<V: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        end: isize,
    ) -> Result<Vec<V>> {
        let key = self.client.key(key)?;
        self.client
            .backend()
            .lrange(&key, start, end)
            .await?
            .iter()
            .map(|bytes| self.client.decode(bytes))
            .collect()
    }

    // == List Get Index ==
    /// Returns the element at `index`, or None if it is out of range.
    pub async fn list_get_index<V: DeserializeOwned>(
        &self,
        key: &str,
        index: isize,
    ) -> Result<Option<V>> {
        let key = self.client.key(key)?;
        match self.client.backend().lindex(&key, index).await? {
            Some(bytes) => Ok(Some(self.client.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    // == List Update Index ==
    /// Overwrites the element at `index`.
    ///
    /// Fails with the store's error if the key is absent or the index is out of range.
    pub async fn list_update_index<V: Serialize + ?Sized>(
        &self,
        key: &str,
        index: isize,
        value: &V,
    ) -> Result<()> {
        let key = self.client.key(key)?;
        let value = self.client.encode(value)?;
        self.client.backend().lset(&key, index, value).await
    }

    // == List Remove ==
    /// Removes occurrences of `value` and returns how many were removed.
    ///
    /// - `count > 0`: the first `count` matches, scanning head to tail
    /// - `count < 0`: the last `|count|` matches, scanning tail to head
    /// - `count == 0`: every match
    pub async fn list_remove<V: Serialize + ?Sized>(
        &self,
        key: &str,
        count: isize,
        value: &V,
    ) -> Result<usize> {
        let key = self.client.key(key)?;
        let value = self.client.encode(value)?;
        self.client.backend().lrem(&key, count, &value).await
    }
}
