// Database Connection Pool
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Manages the SQLite connection pool with sqlx

use crate::db::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Single-writer SQLite pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create a new pool from configuration, creating the database file if
    /// it does not exist yet
    pub async fn new(config: &DatabaseConfig) -> crate::Result<Self> {
        let connection_string = config.connection_string();

        let connect_options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| {
                crate::CertError::DatabaseError(format!(
                    "Failed to parse SQLite connection string: {}",
                    e
                ))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1) // SQLite is single-writer
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                crate::CertError::DatabaseError(format!("SQLite connection failed: {}", e))
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying sqlx pool
    pub fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
