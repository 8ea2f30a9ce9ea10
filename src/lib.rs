//! Job status tracking for background job processing.
//!
//! Given an opaque job identifier, this crate records and reports the
//! lifecycle state of that job (`Waiting` -> `Running` ->
//! `Failed`/`Complete`) in an external key-value store, with automatic
//! expiry of terminal records after 28 days.
//!
//! Tracking is opt-in per job: a status record exists only for jobs on
//! which [`StatusTracker::create`] was called. Jobs that never opt in
//! experience every accessor as a cheap no-op -- the tracker memoizes the
//! "is this job tracked" observation and never re-checks the store.
//!
//! # Architecture
//!
//! The storage system has two layers:
//!
//! 1. **[`StatusTracker`]** -- All domain semantics: key derivation,
//!    record encoding, the memoized tracking flag, side-key writes, and
//!    terminal-state expiry.
//!
//! 2. **[`KeyValueStore`]** -- Dumb KV trait that backends implement.
//!    No domain logic.
//!
//! # Backends
//!
//! - [`InMemoryStore`](store::memory::InMemoryStore) -- Thread-safe
//!   in-memory backend using `DashMap`, with lazy expiry. Suitable for
//!   tests and single-process deployments.
//! - [`RedisStore`](store::redis::RedisStore) -- Redis backend for shared
//!   multi-process deployments. Available behind the `redis` feature flag.
//!
//! # Module Organization
//!
//! - [`tracker`] - The status tracker itself
//! - [`types`] - The [`JobStatus`] lifecycle enum
//! - [`domain`] - The persisted [`StatusRecord`]
//! - [`keys`] - The store key namespace
//! - [`store`] - KV trait and backends
//! - [`logging`] - Leveled-logging collaborator interface (never called
//!   by the tracker itself)
//!
//! # Example
//!
//! ```
//! use jobtrack::store::memory::InMemoryStore;
//! use jobtrack::{JobStatus, StatusTracker};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), jobtrack::StatusError> {
//! let store = InMemoryStore::new();
//! let mut tracker = StatusTracker::new(store.clone(), "job-42");
//!
//! tracker.create().await?;
//! tracker.update(JobStatus::Running, json!({"step": 1})).await?;
//! assert_eq!(tracker.get().await?, Some(JobStatus::Running));
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod domain;
pub mod error;
pub mod keys;
pub mod logging;
pub mod store;
pub mod tracker;
pub mod types;

// Re-exports for ergonomic access
pub use constants::TERMINAL_EXPIRE_SECS;
pub use domain::StatusRecord;
pub use error::StatusError;
pub use logging::{LogLevel, LogSink};
pub use store::{KeyValueStore, StoreError};
pub use tracker::StatusTracker;
pub use types::JobStatus;
