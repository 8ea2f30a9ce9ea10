//! In-memory key-value store backend.
//!
//! [`InMemoryStore`] implements [`KeyValueStore`] over a shared
//! `DashMap`. Expiry is lazy: [`expire`](KeyValueStore::expire) records
//! an absolute deadline on the entry, and every subsequent operation
//! treats past-deadline entries as absent (removing them on the way).
//! This mirrors what a real store's reaper would do, so retention
//! behavior is testable without a server.
//!
//! Handles are cheap to clone; all clones share the same map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::store::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Option<DateTime<Utc>>,
}

/// Thread-safe in-memory store with lazy expiry.
///
/// # Examples
///
/// ```
/// use jobtrack::store::memory::InMemoryStore;
/// use jobtrack::KeyValueStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), jobtrack::StoreError> {
/// let store = InMemoryStore::new();
/// store.set("k", "v").await?;
/// assert_eq!(store.get("k").await?.as_deref(), Some("v"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<DashMap<String, Entry>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.purge_expired();
        self.data.len()
    }

    /// Returns `true` if the store holds no live keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the remaining time-to-live of `key` in seconds, or `None`
    /// if the key is absent or has no deadline.
    ///
    /// Inspection helper for tests that need to verify expiry scheduling.
    pub fn ttl_secs(&self, key: &str) -> Option<i64> {
        if self.remove_if_expired(key) {
            return None;
        }
        let deadline = self.data.get(key)?.deadline?;
        Some((deadline - Utc::now()).num_seconds())
    }

    /// Removes `key` if its deadline has passed. Returns `true` if the
    /// entry was expired.
    fn remove_if_expired(&self, key: &str) -> bool {
        let expired = self
            .data
            .get(key)
            .is_some_and(|e| e.deadline.is_some_and(|d| d <= Utc::now()));
        if expired {
            self.data.remove(key);
        }
        expired
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        let dead: Vec<String> = self
            .data
            .iter()
            .filter(|e| e.deadline.is_some_and(|d| d <= now))
            .map(|e| e.key().clone())
            .collect();
        for key in dead {
            self.data.remove(&key);
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.remove_if_expired(key) {
            return Ok(None);
        }
        Ok(self.data.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Overwrite clears any previous deadline, matching Redis SET.
        self.data.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                deadline: None,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        if self.remove_if_expired(key) {
            return Ok(false);
        }
        Ok(self.data.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        if self.remove_if_expired(key) {
            return Ok(false);
        }
        Ok(self.data.contains_key(key))
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, StoreError> {
        if self.remove_if_expired(key) {
            return Ok(false);
        }
        // Checked arithmetic: a window too large to represent degrades to
        // "never expires" rather than panicking.
        let deadline = i64::try_from(seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|d| Utc::now().checked_add_signed(d));
        match self.data.get_mut(key) {
            Some(mut entry) => {
                entry.deadline = deadline;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
