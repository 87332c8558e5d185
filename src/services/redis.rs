//! Redis-backed operator allow-list
//!
//! The list is stored as a JSON array under a single key, `<prefix>operators`,
//! and replaced as a whole on every save.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use tracing::{debug, warn};
use crate::config::RedisConfig;
use crate::services::operators::OperatorStorage;
use crate::utils::errors::Result;

const OPERATORS_KEY: &str = "operators";

/// Operator storage over a shared Redis connection
#[derive(Clone)]
pub struct RedisOperatorStorage {
    connection: ConnectionManager,
    key: String,
}

impl RedisOperatorStorage {
    /// Connect to Redis using the configured url and key prefix
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self::with_connection(connection, &config.prefix))
    }

    pub fn with_connection(connection: ConnectionManager, prefix: &str) -> Self {
        Self {
            connection,
            key: operators_key(prefix),
        }
    }

    /// Ping the server
    pub async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        match result {
            Ok(response) => response == "PONG",
            Err(e) => {
                warn!(error = %e, "Redis health check failed");
                false
            }
        }
    }
}

fn operators_key(prefix: &str) -> String {
    format!("{}{}", prefix, OPERATORS_KEY)
}

#[async_trait]
impl OperatorStorage for RedisOperatorStorage {
    async fn load(&self) -> Result<Vec<i64>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(&self.key).await?;

        match raw {
            Some(data) => {
                debug!(key = %self.key, "Operator list loaded from Redis");
                Ok(serde_json::from_str(&data)?)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, operators: &[i64]) -> Result<()> {
        let mut conn = self.connection.clone();
        let serialized = serde_json::to_string(operators)?;
        let _: () = conn.set(&self.key, serialized).await?;
        debug!(key = %self.key, count = operators.len(), "Operator list saved to Redis");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("redis:{}", self.key)
    }
}
