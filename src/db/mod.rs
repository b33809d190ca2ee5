// Database Module
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Complete persistence layer: client registry, settings store, and
// append-only notification ledger over SQLite

pub mod config;
pub mod connection;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod traits;

// Re-exports
pub use config::{Config, DatabaseConfig};
pub use connection::DatabasePool;
pub use migrations::run_migrations;
pub use models::*;
pub use traits::*;

use chrono::{Datelike, TimeZone, Utc};
use repositories::{ClientRepositoryImpl, NotificationRepositoryImpl, SettingsRepositoryImpl};
use serde::Serialize;

/// Aggregate counters for the status overview
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatistics {
    pub total_clients: i64,
    pub clients_with_email: i64,
    pub notifications_sent: i64,
    pub notifications_this_month: i64,
}

/// Main database struct
pub struct CertDatabase {
    pool: DatabasePool,
    clients: ClientRepositoryImpl,
    settings: SettingsRepositoryImpl,
    notifications: NotificationRepositoryImpl,
}

impl CertDatabase {
    /// Open (creating if needed) and migrate the database
    pub async fn new(config: &DatabaseConfig) -> crate::Result<Self> {
        let pool = DatabasePool::new(config).await?;

        run_migrations(&pool).await?;

        Ok(Self {
            clients: ClientRepositoryImpl::new(pool.clone()),
            settings: SettingsRepositoryImpl::new(pool.clone()),
            notifications: NotificationRepositoryImpl::new(pool.clone()),
            pool,
        })
    }

    /// Create database from a TOML config file
    pub async fn from_config_file(path: &str) -> crate::Result<Self> {
        let config = DatabaseConfig::from_file(path)?;
        Self::new(&config.database).await
    }

    /// Client registry boundary
    pub fn clients(&self) -> &dyn ClientRegistry {
        &self.clients
    }

    /// Configuration store boundary
    pub fn settings(&self) -> &dyn ConfigStore {
        &self.settings
    }

    /// Notification ledger boundary
    pub fn notifications(&self) -> &dyn NotificationLedger {
        &self.notifications
    }

    /// Aggregate counters for the status overview
    pub async fn statistics(&self) -> crate::Result<StoreStatistics> {
        let now = Utc::now();
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);

        Ok(StoreStatistics {
            total_clients: self.clients.count().await?,
            clients_with_email: self.clients.count_with_email().await?,
            notifications_sent: self.notifications.count_successful().await?,
            notifications_this_month: self
                .notifications
                .count_successful_since(month_start)
                .await?,
        })
    }

    /// Close the connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
