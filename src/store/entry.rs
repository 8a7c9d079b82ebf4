//! Cache Entry Module
//!
//! Defines the structure for entries held by the in-memory store.

use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Value ==
/// The typed payload under one key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Plain string value (`GET`/`SET`)
    Bytes(Vec<u8>),
    /// Field -> value map (`HGET`/`HSET`)
    Hash(HashMap<Vec<u8>, Vec<u8>>),
    /// Ordered sequence (`RPUSH`/`LRANGE`)
    List(VecDeque<Vec<u8>>),
}

impl StoredValue {
    /// Returns true for a hash or list with no elements left.
    ///
    /// Such keys are removed, the way Redis drops empty aggregates.
    pub fn is_empty_aggregate(&self) -> bool {
        match self {
            StoredValue::Bytes(_) => false,
            StoredValue::Hash(map) => map.is_empty(),
            StoredValue::List(list) => list.is_empty(),
        }
    }
}

// == Cache Entry ==
/// Represents a single entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: StoredValue,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that never expires.
    pub fn new(value: StoredValue) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    // == Expire ==
    /// Sets the absolute expiration time, in Unix milliseconds.
    ///
    /// Use [`expiry_deadline`] to turn a TTL into a deadline.
    pub fn expire_at(&mut self, deadline_ms: u64) {
        self.expires_at = Some(deadline_ms);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    /// Returns remaining TTL rounded to the nearest second, as Redis `TTL` does.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| (ms + 500) / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Returns the Unix millisecond deadline `ttl_seconds` from now.
///
/// None if the deadline does not fit a signed 64-bit millisecond timestamp,
/// the range Redis accepts for expire times.
pub fn expiry_deadline(ttl_seconds: u64) -> Option<u64> {
    ttl_seconds
        .checked_mul(1000)
        .and_then(|ms| current_timestamp_ms().checked_add(ms))
        .filter(|deadline| *deadline <= i64::MAX as u64)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn bytes(s: &str) -> StoredValue {
        StoredValue::Bytes(s.as_bytes().to_vec())
    }

    fn expiring(value: StoredValue, ttl_seconds: u64) -> CacheEntry {
        let mut entry = CacheEntry::new(value);
        entry.expire_at(expiry_deadline(ttl_seconds).unwrap());
        entry
    }

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new(bytes("test_value"));

        assert_eq!(entry.value, bytes("test_value"));
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = expiring(bytes("test_value"), 60);

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = expiring(bytes("test_value"), 1);
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expire_at_sets_deadline() {
        let mut entry = CacheEntry::new(bytes("v"));
        entry.expire_at(expiry_deadline(10).unwrap());

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= 10);
        assert!(remaining >= 9);
    }

    #[test]
    fn test_ttl_rounds_to_nearest_second() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(bytes("v"));

        entry.expire_at(now + 10_300);
        assert_eq!(entry.ttl_remaining(), Some(10));

        entry.expire_at(now + 10_800);
        assert_eq!(entry.ttl_remaining(), Some(11));
    }

    #[test]
    fn test_expiry_deadline_rejects_overflow() {
        assert!(expiry_deadline(60).is_some());
        assert!(expiry_deadline(u64::MAX / 10).is_none());
        assert!(expiry_deadline(u64::MAX).is_none());
        assert!(expiry_deadline(i64::MAX as u64 / 1000).is_none());
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let entry = CacheEntry::new(bytes("v"));

        assert!(entry.ttl_remaining().is_none());
        assert!(entry.ttl_remaining_ms().is_none());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: bytes("test"),
            expires_at: Some(now),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_empty_aggregates() {
        assert!(!bytes("").is_empty_aggregate());
        assert!(StoredValue::List(VecDeque::new()).is_empty_aggregate());
        assert!(StoredValue::Hash(HashMap::new()).is_empty_aggregate());
        assert!(!StoredValue::List(VecDeque::from(vec![b"x".to_vec()])).is_empty_aggregate());
    }
}
