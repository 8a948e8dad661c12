use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::fmt;
use tracing::{info, warn};

use crate::error::{Result, StorageError};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        // Pool sizing from environment or defaults sized for a small service
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let connect_options = connection_string
            .trim()
            .parse::<PgConnectOptions>()
            .map_err(|e| {
                StorageError::Internal(format!(
                    "Invalid PostgreSQL connection string: {}",
                    e
                ))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                StorageError::Internal(format!(
                    "Database connection failed: {}",
                    e
                ))
            })?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(PostgresDatabase {
            pool,
            max_connections,
            min_connections,
        })
    }

    /// Create a PostgresDatabase from an existing pool (mainly for testing)
    pub fn from_pool(pool: PgPool) -> Self {
        PostgresDatabase {
            pool,
            max_connections: 10,
            min_connections: 2,
        }
    }

    /// Get a reference to the connection pool for repository construction
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Connectivity and prerequisite checks run before migrations so
    /// operators get an actionable error instead of a mid-migration failure.
    async fn preflight_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                StorageError::Internal(format!(
                    "Database connectivity check failed: {}",
                    e
                ))
            })?;

        // gen_random_uuid() needs pgcrypto on Postgres < 13; migrations
        // create the extension IF NOT EXISTS, which requires privileges.
        let ext_pgcrypto = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM pg_extension WHERE extname = 'pgcrypto')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            StorageError::Internal(format!(
                "Extension check (pgcrypto) failed: {}",
                e
            ))
        })?;

        if !ext_pgcrypto {
            warn!(
                "pgcrypto extension missing; migrations will attempt to create it"
            );
        }

        Ok(())
    }

    /// Run migrations after performing preflight checks.
    pub async fn initialize_schema(&self) -> Result<()> {
        self.preflight_check().await?;

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                StorageError::Internal(format!("Migration failed: {}", e))
            })?;

        Ok(())
    }
}
