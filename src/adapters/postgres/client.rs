//! Pooled PostgreSQL store client
//!
//! One `StoreClient` per logical store (roster/registry database and the
//! event database). Failures surface as [`StoreError`]; the adapter that
//! owns the query wraps them into the pipeline condition for its phase.

use crate::config::StoreConfig;
use crate::domain::{Result, StoreError, TallyError};
use deadpool_postgres::{Config as PoolConfig, Manager, ManagerConfig, Pool, RecyclingMethod};
use std::time::Duration;
use tokio_postgres::{NoTls, Row};

/// Pooled client for one PostgreSQL store
pub struct StoreClient {
    pool: Pool,
    config: StoreConfig,
}

impl StoreClient {
    /// Create a new store client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the connection string is invalid or
    /// the pool cannot be built.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config.connection_string.parse().map_err(|e| {
            TallyError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

        let mut pool_config = PoolConfig::new();
        pool_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            pool_config.manager.unwrap_or_default(),
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| {
                TallyError::Configuration(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Get a connection from the pool
    ///
    /// The connection is returned to the pool when the object drops, on
    /// every exit path.
    pub async fn get_connection(
        &self,
    ) -> std::result::Result<deadpool_postgres::Object, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError(format!("Failed to get connection from pool: {}", e)))
    }

    /// Execute a query and return rows
    ///
    /// Applies the configured statement timeout first, so a hung query
    /// fails instead of blocking the run indefinitely.
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> std::result::Result<Vec<Row>, StoreError> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .execute(&timeout_query, &[])
            .await
            .map_err(|e| StoreError(format!("Failed to set statement timeout: {}", e)))?;

        client
            .query(query, params)
            .await
            .map_err(|e| StoreError(format!("Query failed: {}", e)))
    }

    /// Connection string with the password redacted, safe for logs
    pub fn connection_string_safe(&self) -> String {
        self.config.connection_string_safe()
    }
}
