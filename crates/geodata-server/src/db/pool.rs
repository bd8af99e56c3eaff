//! Database connection pool management.

use crate::config::DatabaseConfig;
use crate::db::auth;
use crate::error::{AppError, AppResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = PgPool;

/// Create a new database connection pool.
///
/// When IAM authentication is enabled, a fresh token is generated and used
/// as the connection password.
///
/// # Errors
///
/// Returns an error if token generation fails or the pool cannot be created.
pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let options = if config.iam_auth {
        let token = auth::build_auth_token(
            &config.host,
            config.port_number(),
            &config.user,
            &config.region,
            config.aws_profile.as_deref(),
        )
        .await
        .map_err(|e| AppError::Config(format!("failed to generate IAM auth token: {e}")))?;
        config.connect_options_with_password(&token)
    } else {
        config.connect_options()
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect_with(options)
        .await?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        database = %config.database,
        iam_auth = config.iam_auth,
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Check if the database connection is healthy.
pub async fn health_check(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
