// Settings Repository Implementation
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Opaque key/value configuration rows

use crate::db::connection::DatabasePool;
use crate::db::traits::ConfigStore;
use async_trait::async_trait;
use sqlx::Row;
use std::collections::HashMap;
use tracing::warn;

pub struct SettingsRepositoryImpl {
    pool: DatabasePool,
}

impl SettingsRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for SettingsRepositoryImpl {
    async fn get_value(&self, key: &str) -> crate::Result<Option<String>> {
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool.inner())
            .await
            .map_err(|e| {
                crate::CertError::DatabaseError(format!("Failed to fetch setting: {}", e)).into()
            })
    }

    async fn get_all(&self) -> crate::Result<HashMap<String, String>> {
        let rows = sqlx::query("SELECT key, value FROM settings")
            .fetch_all(self.pool.inner())
            .await
            .map_err(|e| {
                crate::CertError::DatabaseError(format!("Failed to fetch settings: {}", e))
            })?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get::<String, _>("key"), row.get::<String, _>("value")))
            .collect())
    }

    async fn set_value(&self, key: &str, value: &str) -> bool {
        let result = sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.pool.inner())
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(key, error = %e, "setting write failed");
                false
            }
        }
    }

    async fn set_values(&self, values: &[(String, String)]) -> bool {
        for (key, value) in values {
            if !self.set_value(key, value).await {
                return false;
            }
        }
        true
    }
}
