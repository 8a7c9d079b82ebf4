//! Memory Store Module
//!
//! In-process store with Redis command semantics and lazy TTL expiration.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::store::{
    expiry_deadline, CacheBackend, CacheEntry, StoredValue, INDEX_OUT_OF_RANGE, NOT_AN_INTEGER,
    NO_SUCH_KEY, WRONG_TYPE,
};

type Entries = HashMap<Vec<u8>, CacheEntry>;

// == Memory Store ==
/// Key-value storage kept in process memory.
///
/// Each command runs under one lock acquisition, so commands are atomic
/// with respect to each other. Expired entries are invisible to reads and
/// are removed by writes or by [`MemoryStore::purge_expired`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// == Entry Access Helpers ==
fn live<'a>(entries: &'a Entries, key: &[u8]) -> Option<&'a CacheEntry> {
    entries.get(key).filter(|entry| !entry.is_expired())
}

fn live_mut<'a>(entries: &'a mut Entries, key: &[u8]) -> Option<&'a mut CacheEntry> {
    if entries.get(key).is_some_and(CacheEntry::is_expired) {
        entries.remove(key);
    }
    entries.get_mut(key)
}

fn wrong_type() -> CacheError {
    CacheError::Store(WRONG_TYPE.to_string())
}

/// Resolves a TTL to a deadline, failing the way Redis does when it overflows.
fn deadline(ttl_seconds: u64, command: &str) -> Result<u64> {
    expiry_deadline(ttl_seconds).ok_or_else(|| {
        CacheError::Store(format!("ERR invalid expire time in '{}' command", command))
    })
}

fn read_list<'a>(entries: &'a Entries, key: &[u8]) -> Result<Option<&'a VecDeque<Vec<u8>>>> {
    match live(entries, key).map(|entry| &entry.value) {
        None => Ok(None),
        Some(StoredValue::List(list)) => Ok(Some(list)),
        Some(_) => Err(wrong_type()),
    }
}

fn read_hash<'a>(
    entries: &'a Entries,
    key: &[u8],
) -> Result<Option<&'a HashMap<Vec<u8>, Vec<u8>>>> {
    match live(entries, key).map(|entry| &entry.value) {
        None => Ok(None),
        Some(StoredValue::Hash(map)) => Ok(Some(map)),
        Some(_) => Err(wrong_type()),
    }
}

/// Returns the list at `key`, creating an empty one if the key is absent.
fn list_entry<'a>(entries: &'a mut Entries, key: &[u8]) -> Result<&'a mut VecDeque<Vec<u8>>> {
    if live_mut(entries, key).is_none() {
        entries.insert(
            key.to_vec(),
            CacheEntry::new(StoredValue::List(VecDeque::new())),
        );
    }
    match entries.get_mut(key).map(|entry| &mut entry.value) {
        Some(StoredValue::List(list)) => Ok(list),
        _ => Err(wrong_type()),
    }
}

/// Returns the hash at `key`, creating an empty one if the key is absent.
fn hash_entry<'a>(
    entries: &'a mut Entries,
    key: &[u8],
) -> Result<&'a mut HashMap<Vec<u8>, Vec<u8>>> {
    if live_mut(entries, key).is_none() {
        entries.insert(
            key.to_vec(),
            CacheEntry::new(StoredValue::Hash(HashMap::new())),
        );
    }
    match entries.get_mut(key).map(|entry| &mut entry.value) {
        Some(StoredValue::Hash(map)) => Ok(map),
        _ => Err(wrong_type()),
    }
}

/// Drops the key if its hash or list has no elements left.
fn drop_if_empty(entries: &mut Entries, key: &[u8]) {
    if entries
        .get(key)
        .is_some_and(|entry| entry.value.is_empty_aggregate())
    {
        entries.remove(key);
    }
}

fn parse_integer(bytes: &[u8]) -> Result<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| CacheError::Store(NOT_AN_INTEGER.to_string()))
}

fn add_integer(current: i64, delta: i64) -> Result<i64> {
    current
        .checked_add(delta)
        .ok_or_else(|| CacheError::Store(NOT_AN_INTEGER.to_string()))
}

/// Resolves a possibly negative index against `len`, Redis style.
fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

/// Clamps an `LRANGE` window to `len`; returns None for an empty window.
fn resolve_range(start: isize, stop: isize, len: usize) -> Option<(usize, usize)> {
    let len = len as isize;
    let mut start = if start < 0 { len + start } else { start };
    let mut stop = if stop < 0 { len + stop } else { stop };
    if start < 0 {
        start = 0;
    }
    if start > stop || start >= len {
        return None;
    }
    if stop >= len {
        stop = len - 1;
    }
    Some((start as usize, stop as usize))
}

/// Removes matches of `value`: first `count` for positive, last `|count|` for negative, all for zero.
fn remove_matches(list: &mut VecDeque<Vec<u8>>, count: isize, value: &[u8]) -> usize {
    let limit = if count == 0 {
        usize::MAX
    } else {
        count.unsigned_abs()
    };
    let mut removed = 0;

    if count >= 0 {
        let mut i = 0;
        while i < list.len() && removed < limit {
            if list[i].as_slice() == value {
                list.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
    } else {
        let mut i = list.len();
        while i > 0 && removed < limit {
            i -= 1;
            if list[i].as_slice() == value {
                list.remove(i);
                removed += 1;
            }
        }
    }

    removed
}

#[async_trait]
impl CacheBackend for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    // == Keys ==
    async fn exists(&self, key: &[u8]) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(live(&entries, key).is_some())
    }

    async fn del(&self, keys: &[Vec<u8>]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        for key in keys {
            if live_mut(&mut entries, key).is_some() {
                entries.remove(key.as_slice());
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn expire(&self, key: &[u8], seconds: u64) -> Result<bool> {
        let deadline = deadline(seconds, "expire")?;
        let mut entries = self.entries.write().await;
        match live_mut(&mut entries, key) {
            Some(entry) => {
                entry.expire_at(deadline);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &[u8]) -> Result<i64> {
        let entries = self.entries.read().await;
        Ok(match live(&entries, key) {
            None => -2,
            Some(entry) => entry
                .ttl_remaining()
                .map_or(-1, |secs| secs as i64),
        })
    }

    // == Strings ==
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        match live(&entries, key).map(|entry| &entry.value) {
            None => Ok(None),
            Some(StoredValue::Bytes(bytes)) => Ok(Some(bytes.clone())),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn set(&self, key: &[u8], value: Vec<u8>, ttl_seconds: Option<u64>) -> Result<()> {
        let mut entry = CacheEntry::new(StoredValue::Bytes(value));
        if let Some(seconds) = ttl_seconds {
            entry.expire_at(deadline(seconds, "set")?);
        }
        self.entries.write().await.insert(key.to_vec(), entry);
        Ok(())
    }

    async fn incr_by(&self, key: &[u8], delta: i64) -> Result<i64> {
        let mut entries = self.entries.write().await;
        match live_mut(&mut entries, key) {
            None => {
                entries.insert(
                    key.to_vec(),
                    CacheEntry::new(StoredValue::Bytes(delta.to_string().into_bytes())),
                );
                Ok(delta)
            }
            Some(entry) => match &mut entry.value {
                StoredValue::Bytes(bytes) => {
                    let next = add_integer(parse_integer(bytes)?, delta)?;
                    *bytes = next.to_string().into_bytes();
                    Ok(next)
                }
                _ => Err(wrong_type()),
            },
        }
    }

    // == Hashes ==
    async fn hget(&self, key: &[u8], field: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(read_hash(&entries, key)?.and_then(|map| map.get(field).cloned()))
    }

    async fn hset(&self, key: &[u8], field: Vec<u8>, value: Vec<u8>) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let map = hash_entry(&mut entries, key)?;
        Ok(map.insert(field, value).is_none())
    }

    async fn hset_multiple(&self, key: &[u8], fields: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut entries = self.entries.write().await;
        let map = hash_entry(&mut entries, key)?;
        map.extend(fields);
        Ok(())
    }

    async fn hgetall(&self, key: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let entries = self.entries.read().await;
        Ok(read_hash(&entries, key)?
            .map(|map| map.iter().map(|(f, v)| (f.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    async fn hdel(&self, key: &[u8], fields: &[Vec<u8>]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let removed = match live_mut(&mut entries, key).map(|entry| &mut entry.value) {
            None => return Ok(0),
            Some(StoredValue::Hash(map)) => fields
                .iter()
                .filter(|field| map.remove(field.as_slice()).is_some())
                .count(),
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    async fn hexists(&self, key: &[u8], field: &[u8]) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(read_hash(&entries, key)?.is_some_and(|map| map.contains_key(field)))
    }

    async fn hincr_by(&self, key: &[u8], field: &[u8], delta: i64) -> Result<i64> {
        let mut entries = self.entries.write().await;
        let map = hash_entry(&mut entries, key)?;
        let current = match map.get(field) {
            Some(bytes) => parse_integer(bytes)?,
            None => 0,
        };
        let next = add_integer(current, delta)?;
        map.insert(field.to_vec(), next.to_string().into_bytes());
        Ok(next)
    }

    // == Lists ==
    async fn rpush(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize> {
        let mut entries = self.entries.write().await;
        if items.is_empty() {
            return Ok(read_list(&entries, key)?.map_or(0, VecDeque::len));
        }
        let list = list_entry(&mut entries, key)?;
        list.extend(items);
        Ok(list.len())
    }

    async fn replace_list(&self, key: &[u8], items: Vec<Vec<u8>>) -> Result<usize> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        if items.is_empty() {
            return Ok(0);
        }
        let len = items.len();
        entries.insert(
            key.to_vec(),
            CacheEntry::new(StoredValue::List(items.into())),
        );
        Ok(len)
    }

    async fn llen(&self, key: &[u8]) -> Result<usize> {
        let entries = self.entries.read().await;
        Ok(read_list(&entries, key)?.map_or(0, VecDeque::len))
    }

    async fn lrange(&self, key: &[u8], start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries.read().await;
        let Some(list) = read_list(&entries, key)? else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(start, stop, list.len()) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        })
    }

    async fn lindex(&self, key: &[u8], index: isize) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(read_list(&entries, key)?.and_then(|list| {
            resolve_index(index, list.len()).and_then(|i| list.get(i).cloned())
        }))
    }

    async fn lset(&self, key: &[u8], index: isize, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().await;
        match live_mut(&mut entries, key).map(|entry| &mut entry.value) {
            None => Err(CacheError::Store(NO_SUCH_KEY.to_string())),
            Some(StoredValue::List(list)) => {
                let i = resolve_index(index, list.len())
                    .ok_or_else(|| CacheError::Store(INDEX_OUT_OF_RANGE.to_string()))?;
                list[i] = value;
                Ok(())
            }
            Some(_) => Err(wrong_type()),
        }
    }

    async fn lrem(&self, key: &[u8], count: isize, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let removed = match live_mut(&mut entries, key).map(|entry| &mut entry.value) {
            None => return Ok(0),
            Some(StoredValue::List(list)) => remove_matches(list, count, value),
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }
}
