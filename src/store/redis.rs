//! Redis key-value store backend.
//!
//! [`RedisStore`] implements [`KeyValueStore`] over a multiplexed async
//! connection, mapping each trait method to the Redis command of the same
//! name (`GET`/`SET`/`DEL`/`EXISTS`/`EXPIRE`). Expiry of terminal records
//! is handled natively by Redis.
//!
//! # Connection Model
//!
//! `RedisStore` holds a [`MultiplexedConnection`], which is designed to
//! be cloned cheaply -- all clones share the same underlying TCP
//! connection. Each method clones the connection for concurrent safety,
//! so one `RedisStore` can back any number of trackers.

use ::redis::aio::MultiplexedConnection;
use ::redis::AsyncCommands;
use async_trait::async_trait;

use crate::store::{KeyValueStore, StoreError};

/// Redis-backed [`KeyValueStore`].
///
/// # Examples
///
/// ```rust,no_run
/// use jobtrack::store::redis::RedisStore;
/// use jobtrack::StatusTracker;
///
/// # async fn example() {
/// let store = RedisStore::new("redis://127.0.0.1:6379").await.unwrap();
/// let tracker = StatusTracker::new(store.clone(), "job-42");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Creates a store by connecting to Redis at the given URL.
    ///
    /// The URL format is `redis://[:<password>@]<host>:<port>[/<db>]`.
    /// Fails fast if the connection cannot be established.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the client cannot be created or
    /// the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self, StoreError> {
        let client = ::redis::Client::open(url).map_err(|e| StoreError::Backend {
            message: format!("failed to create Redis client: {e}"),
            source: Some(Box::new(e)),
        })?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Backend {
                message: format!("failed to connect to Redis: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { conn })
    }

    /// Creates a store from a pre-built multiplexed connection.
    ///
    /// Useful when the caller manages connection lifecycle or needs
    /// custom connection configuration.
    pub fn with_connection(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

/// Maps a Redis error to a [`StoreError::Backend`].
fn map_redis_error(err: ::redis::RedisError, key: &str) -> StoreError {
    StoreError::Backend {
        message: format!("Redis error for key {key}: {err}"),
        source: Some(Box::new(err)),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(|e| map_redis_error(e, key))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let () = conn
            .set(key, value)
            .await
            .map_err(|e| map_redis_error(e, key))?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await.map_err(|e| map_redis_error(e, key))?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let present: bool = conn
            .exists(key)
            .await
            .map_err(|e| map_redis_error(e, key))?;
        Ok(present)
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let secs = i64::try_from(seconds).unwrap_or(i64::MAX);
        let applied: bool = conn
            .expire(key, secs)
            .await
            .map_err(|e| map_redis_error(e, key))?;
        Ok(applied)
    }
}

// ---------------------------------------------------------------------------
// Integration tests -- Redis backend contract tests
// ---------------------------------------------------------------------------

/// Integration tests for [`RedisStore`] against a real Redis instance.
///
/// These tests require:
/// - A running Redis instance (default: `redis://127.0.0.1:6379`)
/// - Set `REDIS_URL` environment variable to override the connection URL
///
/// Run with:
/// ```bash
/// cargo test --features redis-tests -- redis_
/// ```
///
/// Each test uses UUID-based keys for isolation, so tests do not interfere
/// with each other and no cleanup is needed.
#[cfg(all(test, feature = "redis-tests"))]
mod integration_tests {
    use super::*;

    async fn test_store() -> RedisStore {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        RedisStore::new(&url)
            .await
            .expect("Redis connection failed -- is Redis running?")
    }

    fn unique_key(tag: &str) -> String {
        format!("jobtrack-test:{}:{tag}", uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn redis_get_missing_returns_none() {
        let store = test_store().await;
        let key = unique_key("missing");
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn redis_set_then_get_round_trips() {
        let store = test_store().await;
        let key = unique_key("roundtrip");
        store.set(&key, "payload").await.unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("payload"));
        store.del(&key).await.unwrap();
    }

    #[tokio::test]
    async fn redis_del_reports_presence() {
        let store = test_store().await;
        let key = unique_key("del");
        store.set(&key, "v").await.unwrap();
        assert!(store.del(&key).await.unwrap());
        assert!(!store.del(&key).await.unwrap());
    }

    #[tokio::test]
    async fn redis_exists_reflects_presence() {
        let store = test_store().await;
        let key = unique_key("exists");
        assert!(!store.exists(&key).await.unwrap());
        store.set(&key, "v").await.unwrap();
        assert!(store.exists(&key).await.unwrap());
        store.del(&key).await.unwrap();
    }

    #[tokio::test]
    async fn redis_expire_sets_a_ttl() {
        let store = test_store().await;
        let key = unique_key("expire");
        store.set(&key, "v").await.unwrap();
        assert!(store.expire(&key, 600).await.unwrap());

        let mut conn = store.conn.clone();
        let ttl: i64 = ::redis::cmd("TTL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .unwrap();
        assert!((1..=600).contains(&ttl), "unexpected ttl: {ttl}");
        store.del(&key).await.unwrap();
    }

    #[tokio::test]
    async fn redis_expire_missing_returns_false() {
        let store = test_store().await;
        let key = unique_key("expire-missing");
        assert!(!store.expire(&key, 600).await.unwrap());
    }
}
