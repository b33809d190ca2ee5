// Notification Repository Implementation
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Append-only ledger operations over the notifications table

use crate::db::connection::DatabasePool;
use crate::db::models::{NotificationKind, NotificationRecord};
use crate::db::traits::NotificationLedger;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

pub struct NotificationRepositoryImpl {
    pool: DatabasePool,
}

impl NotificationRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Total successful notifications ever sent
    pub async fn count_successful(&self) -> crate::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE succeeded = 1")
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| {
                crate::CertError::DatabaseError(format!("Failed to count notifications: {}", e))
                    .into()
            })
    }

    /// Successful notifications since a given instant
    pub async fn count_successful_since(&self, since: DateTime<Utc>) -> crate::Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE succeeded = 1 AND sent_at >= ?",
        )
        .bind(since)
        .fetch_one(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to count notifications: {}", e)).into()
        })
    }
}

#[async_trait]
impl NotificationLedger for NotificationRepositoryImpl {
    async fn append(
        &self,
        client_code: &str,
        kind: NotificationKind,
        succeeded: bool,
        error_message: Option<&str>,
    ) -> bool {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (client_code, sent_at, kind, succeeded, error_message)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(client_code)
        .bind(Utc::now())
        .bind(kind)
        .bind(succeeded)
        .bind(error_message)
        .execute(self.pool.inner())
        .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(client_code, error = %e, "ledger append failed");
                false
            }
        }
    }

    async fn last_successful(
        &self,
        client_code: &str,
    ) -> crate::Result<Option<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            r#"
            SELECT id, client_code, sent_at, kind, succeeded, error_message
            FROM notifications
            WHERE client_code = ? AND succeeded = 1
            ORDER BY sent_at DESC
            LIMIT 1
            "#,
        )
        .bind(client_code)
        .fetch_optional(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to fetch notification: {}", e)).into()
        })
    }

    async fn list_recent(&self, limit: i64) -> crate::Result<Vec<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            r#"
            SELECT id, client_code, sent_at, kind, succeeded, error_message
            FROM notifications
            ORDER BY sent_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to list notifications: {}", e)).into()
        })
    }
}
