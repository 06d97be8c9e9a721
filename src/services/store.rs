use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::UserMeasurement;

/// Errors that can occur with session store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Per-session measurement store
///
/// L1 is an in-process cache bounded by capacity and TTL. An optional Redis
/// L2 shares sessions between instances and expires entries with the same
/// TTL. Writes to the same token are last-write-wins.
///
/// With Redis configured, reads always go to Redis so a save or clear on one
/// instance is seen by every other. L1 then only keeps a short-lived copy
/// that answers while Redis is unreachable.
pub struct MeasurementStore {
    l1_cache: moka::future::Cache<String, UserMeasurement>,
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    ttl_secs: u64,
}

impl MeasurementStore {
    /// Create a store that lives only in this process
    pub fn in_memory(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            l1_cache: build_l1(capacity, l1_ttl_secs(ttl_secs, false)),
            redis: None,
            ttl_secs,
        }
    }

    /// Create a store backed by Redis as a second tier
    pub async fn with_redis(redis_url: &str, capacity: u64, ttl_secs: u64) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            l1_cache: build_l1(capacity, l1_ttl_secs(ttl_secs, true)),
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            ttl_secs,
        })
    }

    /// Get the measurements saved for a session
    ///
    /// In memory only, L1 answers. With Redis, Redis answers and L1 is
    /// refreshed from it; L1 is read only when Redis fails.
    pub async fn get(&self, token: &str) -> Result<Option<UserMeasurement>, StoreError> {
        let Some(redis) = &self.redis else {
            let measurement = self.l1_cache.get(token).await;
            tracing::trace!("L1 store {}: {}", if measurement.is_some() { "hit" } else { "miss" }, token);
            return Ok(measurement);
        };

        let mut conn = redis.lock().await;
        let value: Result<Option<String>, redis::RedisError> = redis::cmd("GET")
            .arg(SessionKey::measurement(token))
            .query_async(&mut *conn)
            .await;
        drop(conn);

        match value {
            Ok(Some(json)) => {
                tracing::trace!("L2 store hit: {}", token);
                let measurement: UserMeasurement = serde_json::from_str(&json)?;
                self.l1_cache.insert(token.to_string(), measurement.clone()).await;
                Ok(Some(measurement))
            }
            Ok(None) => {
                tracing::trace!("Store miss: {}", token);
                self.l1_cache.invalidate(token).await;
                Ok(None)
            }
            Err(e) => match self.l1_cache.get(token).await {
                Some(measurement) => {
                    tracing::warn!("Redis read failed, serving local copy: {}", e);
                    Ok(Some(measurement))
                }
                None => Err(e.into()),
            },
        }
    }

    /// Save measurements for a session, replacing any earlier ones
    pub async fn put(&self, token: &str, measurement: &UserMeasurement) -> Result<(), StoreError> {
        self.l1_cache.insert(token.to_string(), measurement.clone()).await;

        if let Some(redis) = &self.redis {
            let json = serde_json::to_string(measurement)?;
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(SessionKey::measurement(token))
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Store set: {}", token);
        Ok(())
    }

    /// Forget a session's measurements in both tiers
    pub async fn delete(&self, token: &str) -> Result<(), StoreError> {
        self.l1_cache.invalidate(token).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(SessionKey::measurement(token))
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub fn is_shared(&self) -> bool {
        self.redis.is_some()
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            l1_sessions: self.l1_cache.entry_count(),
            ttl_secs: self.ttl_secs,
            shared: self.is_shared(),
        }
    }
}

/// Lifetime of the local copy when Redis holds the sessions
pub const SHARED_L1_TTL_SECS: u64 = 5;

/// L1 keeps the full TTL in memory-only mode and a short one next to Redis
fn l1_ttl_secs(ttl_secs: u64, shared: bool) -> u64 {
    if shared { ttl_secs.min(SHARED_L1_TTL_SECS) } else { ttl_secs }
}

fn build_l1(capacity: u64, ttl_secs: u64) -> moka::future::Cache<String, UserMeasurement> {
    moka::future::CacheBuilder::new(capacity)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Store statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub l1_sessions: u64,
    pub ttl_secs: u64,
    pub shared: bool,
}

/// Store key builder
pub struct SessionKey;

impl SessionKey {
    /// Build a key for a session's measurements
    pub fn measurement(token: &str) -> String {
        format!("measurement:{}", token)
    }
}
