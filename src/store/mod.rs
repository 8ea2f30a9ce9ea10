//! Key-value store trait and backends.
//!
//! [`KeyValueStore`] is the dependency boundary between the tracker and
//! durable storage. It is a dumb KV contract -- backends never interpret
//! the values they store, and all domain logic (key derivation, record
//! encoding, tracking memoization, expiry policy) lives in
//! [`StatusTracker`](crate::StatusTracker).
//!
//! # Backends
//!
//! - [`memory::InMemoryStore`] -- Thread-safe in-memory backend using
//!   `DashMap`, with lazy expiry of deadline-carrying entries.
//! - [`redis::RedisStore`] -- Redis backend for shared multi-process
//!   deployments. Available behind the `redis` feature flag.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from raw store operations.
///
/// The store is assumed reliable; failures here are connectivity or
/// protocol faults and are always propagated to the caller unchanged --
/// the tracker performs no retry or backoff.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O or backend-specific error (network failure, protocol error,
    /// request timeout).
    #[error("backend error: {message}")]
    Backend {
        /// Human-readable description of the error.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Key-value store supporting the five operations the tracker needs.
///
/// Keys are strings; values are string payloads (the tracker serializes
/// records to JSON before storing). Absence is a normal, representable
/// outcome on reads -- only connectivity failures are errors.
///
/// Implementations must be `Send + Sync`, and store handles are expected
/// to be cheaply cloneable so that many trackers can share one underlying
/// store (a multiplexed connection, an `Arc`'d map).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value at `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on connectivity or protocol failures.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` at `key`, creating or overwriting. Clears any
    /// previously set expiry on the key.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on connectivity or protocol failures.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on connectivity or protocol failures.
    async fn del(&self, key: &str) -> Result<bool, StoreError>;

    /// Returns whether `key` currently exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on connectivity or protocol failures.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Schedules `key` for deletion after `seconds`. Returns `true` if
    /// the key existed and a deadline was set.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on connectivity or protocol failures.
    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, StoreError>;
}
