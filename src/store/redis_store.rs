use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use tokio::time::timeout;
use tracing::info;

use crate::store::kv::{CacheError, KeyValueStore};

/// Redis-backed store. Each call opens its own multiplexed connection, so a
/// server restart only fails the calls made while it is down.
pub struct RedisStore {
    client: redis::Client,
    op_timeout: Duration,
}

impl RedisStore {
    /// Validates the URL and checks the server with PING.
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Backend(e.to_string()))?;
        let store = Self { client, op_timeout };

        let mut conn = store.connection().await?;
        let pong: String = store.bounded(redis::cmd("PING").query_async(&mut conn)).await?;

        info!("Connected to Redis ({})", pong);
        Ok(store)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        self.bounded(self.client.get_multiplexed_async_connection()).await
    }

    async fn bounded<T>(&self, op: impl Future<Output = RedisResult<T>>) -> Result<T, CacheError> {
        timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        self.bounded(conn.get(key)).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        self.bounded(conn.set(key, value)).await
    }
}
