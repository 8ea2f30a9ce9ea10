//! Shared test support: an operation-counting store wrapper.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use jobtrack::{KeyValueStore, StoreError};

/// Per-operation call counters for a [`CountingStore`].
#[derive(Debug, Default)]
pub struct Counters {
    pub get: AtomicUsize,
    pub set: AtomicUsize,
    pub del: AtomicUsize,
    pub exists: AtomicUsize,
    pub expire: AtomicUsize,
}

impl Counters {
    /// Store operations that read state.
    #[allow(dead_code)]
    pub fn reads(&self) -> usize {
        self.get.load(Ordering::SeqCst) + self.exists.load(Ordering::SeqCst)
    }

    /// Store operations that write state.
    #[allow(dead_code)]
    pub fn writes(&self) -> usize {
        self.set.load(Ordering::SeqCst)
            + self.del.load(Ordering::SeqCst)
            + self.expire.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn exists_probes(&self) -> usize {
        self.exists.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn total(&self) -> usize {
        self.reads() + self.writes()
    }
}

/// Wraps a [`KeyValueStore`] and counts every operation, so tests can
/// assert that memoization short-circuits store round-trips.
#[derive(Debug, Clone)]
pub struct CountingStore<S> {
    inner: S,
    pub counters: Arc<Counters>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            counters: Arc::new(Counters::default()),
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for CountingStore<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.counters.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.counters.set.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        self.counters.del.fetch_add(1, Ordering::SeqCst);
        self.inner.del(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.counters.exists.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, StoreError> {
        self.counters.expire.fetch_add(1, Ordering::SeqCst);
        self.inner.expire(key, seconds).await
    }
}
