//! Storage handle with credential-refreshing reconnect.
//!
//! IAM auth tokens expire after 15 minutes, so a long-lived pool can lose
//! the ability to open new connections. The storage handle keeps the pool
//! behind an `RwLock` and rebuilds it with fresh credentials when the
//! database stops responding.

use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::DatabaseConfig;
use crate::db::pool::{self, create_pool, DbPool};
use crate::error::AppResult;

/// Ping deadline before a reconnect is attempted.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Database storage handle.
pub struct Storage {
    pool: RwLock<DbPool>,
    config: DatabaseConfig,
}

impl Storage {
    /// Connect to the database and wrap the pool in a storage handle.
    pub async fn connect(config: DatabaseConfig) -> AppResult<Self> {
        let pool = create_pool(&config).await?;
        Ok(Self {
            pool: RwLock::new(pool),
            config,
        })
    }

    /// Get a clone of the current pool. `PgPool` clones share the same
    /// underlying connections.
    pub async fn pool(&self) -> DbPool {
        self.pool.read().await.clone()
    }

    /// Ping the database and rebuild the pool with fresh credentials when
    /// it is unreachable.
    pub async fn reconnect(&self) -> AppResult<()> {
        let pool = self.pool().await;
        let ping = tokio::time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(&pool)).await;
        if matches!(ping, Ok(Ok(_))) {
            return Ok(());
        }

        tracing::info!(host = %self.config.host, "Reconnecting to database");
        let fresh = create_pool(&self.config).await?;
        *self.pool.write().await = fresh;
        Ok(())
    }

    /// Check if the database connection is healthy.
    pub async fn health(&self) -> bool {
        let pool = self.pool().await;
        pool::health_check(&pool).await
    }
}
