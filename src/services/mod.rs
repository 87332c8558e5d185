//! Services module
//!
//! FAQ content and the operator allow-list, wired from settings.

pub mod content;
pub mod operators;
pub mod redis;

pub use content::{CategoryChange, ContentStore, EntryChange, MemoryContentStore};
pub use operators::{
    JsonFileOperatorStorage, MemoryOperatorStorage, OperatorChange, OperatorRegistry, OperatorStorage,
};
pub use redis::RedisOperatorStorage;

use std::sync::Arc;
use tracing::{info, warn};
use crate::config::settings::{ContentBackend, OperatorBackend, Settings};
use crate::database::{self, DatabasePool, FaqRepository};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub content: Arc<dyn ContentStore>,
    pub operators: Arc<OperatorRegistry>,
    pool: Option<DatabasePool>,
    redis: Option<RedisOperatorStorage>,
}

impl ServiceFactory {
    /// Wrap already built stores
    pub fn new(content: Arc<dyn ContentStore>, operators: Arc<OperatorRegistry>) -> Self {
        Self {
            content,
            operators,
            pool: None,
            redis: None,
        }
    }

    /// Build the configured backends and seed the operator list
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let (content, pool): (Arc<dyn ContentStore>, Option<DatabasePool>) =
            match settings.storage.content_backend {
                ContentBackend::Postgres => {
                    info!("Connecting to database...");
                    let pool = database::create_pool(&settings.database).await?;
                    info!("Running database migrations...");
                    database::run_migrations(&pool).await?;
                    (Arc::new(FaqRepository::new(pool.clone())) as Arc<dyn ContentStore>, Some(pool))
                }
                ContentBackend::Memory => {
                    warn!("FAQ content is kept in memory and will be lost on restart");
                    (Arc::new(MemoryContentStore::new()) as Arc<dyn ContentStore>, None)
                }
            };

        let (storage, redis): (Arc<dyn OperatorStorage>, Option<RedisOperatorStorage>) =
            match settings.storage.operator_backend {
                OperatorBackend::File => {
                    let storage = JsonFileOperatorStorage::new(&settings.storage.operators_file);
                    (Arc::new(storage) as Arc<dyn OperatorStorage>, None)
                }
                OperatorBackend::Redis => {
                    info!("Connecting to Redis...");
                    let redis = RedisOperatorStorage::connect(&settings.redis).await?;
                    (Arc::new(redis.clone()) as Arc<dyn OperatorStorage>, Some(redis))
                }
                OperatorBackend::Memory => {
                    (Arc::new(MemoryOperatorStorage::new(Vec::new())) as Arc<dyn OperatorStorage>, None)
                }
            };

        let operators = OperatorRegistry::load(storage).await?;
        let seeded = operators.bootstrap(&settings.bot.operator_ids).await?;
        if seeded > 0 {
            info!(count = seeded, "Seeded operators from configuration");
        }
        if operators.list_operators().await.is_empty() {
            warn!("No operators configured; the admin panel is unreachable");
        }

        Ok(Self {
            content,
            operators: Arc::new(operators),
            pool,
            redis,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = match &self.pool {
            Some(pool) => Some(database::health_check(pool).await.is_ok()),
            None => None,
        };
        let redis_healthy = match &self.redis {
            Some(redis) => Some(redis.health_check().await),
            None => None,
        };

        ServiceHealthStatus {
            database_healthy,
            redis_healthy,
            operator_count: self.operators.list_operators().await.len(),
        }
    }
}

/// Health status for all services; `None` means the backend is not in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealthStatus {
    pub database_healthy: Option<bool>,
    pub redis_healthy: Option<bool>,
    pub operator_count: usize,
}

impl ServiceHealthStatus {
    /// Check if all backends in use are reachable
    pub fn is_healthy(&self) -> bool {
        self.database_healthy != Some(false) && self.redis_healthy != Some(false)
    }

    /// Get list of problems worth reporting
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.database_healthy == Some(false) {
            issues.push("Database connection failed".to_string());
        }
        if self.redis_healthy == Some(false) {
            issues.push("Redis connection failed".to_string());
        }
        if self.operator_count == 0 {
            issues.push("No operators configured".to_string());
        }

        issues
    }
}
