// Client Repository Implementation
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Registry operations over the clients table

use crate::db::connection::DatabasePool;
use crate::db::models::ClientRecord;
use crate::db::traits::ClientRegistry;
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

pub struct ClientRepositoryImpl {
    pool: DatabasePool,
}

impl ClientRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Total registered clients
    pub async fn count(&self) -> crate::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| {
                crate::CertError::DatabaseError(format!("Failed to count clients: {}", e)).into()
            })
    }

    /// Clients that can actually receive notifications
    pub async fn count_with_email(&self) -> crate::Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM clients WHERE email IS NOT NULL AND email != ''",
        )
        .fetch_one(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to count clients: {}", e)).into()
        })
    }
}

#[async_trait]
impl ClientRegistry for ClientRepositoryImpl {
    async fn get_client(&self, code: &str) -> crate::Result<Option<ClientRecord>> {
        sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT id, code, legal_name, email, phone, responsible, notes, created_at, updated_at
            FROM clients
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to fetch client: {}", e)).into()
        })
    }

    async fn list_clients(&self) -> crate::Result<Vec<ClientRecord>> {
        sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT id, code, legal_name, email, phone, responsible, notes, created_at, updated_at
            FROM clients
            ORDER BY code
            "#,
        )
        .fetch_all(self.pool.inner())
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to list clients: {}", e)).into()
        })
    }

    async fn upsert_client(&self, record: &ClientRecord) -> bool {
        let result = sqlx::query(
            r#"
            INSERT INTO clients (code, legal_name, email, phone, responsible, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (code) DO UPDATE SET
                legal_name = excluded.legal_name,
                email = excluded.email,
                phone = excluded.phone,
                responsible = excluded.responsible,
                notes = excluded.notes,
                updated_at = ?
            "#,
        )
        .bind(&record.code)
        .bind(&record.legal_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.responsible)
        .bind(&record.notes)
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(code = %record.code, error = %e, "client upsert failed");
                false
            }
        }
    }

    async fn delete_client(&self, code: &str) -> bool {
        match sqlx::query("DELETE FROM clients WHERE code = ?")
            .bind(code)
            .execute(self.pool.inner())
            .await
        {
            Ok(result) => result.rows_affected() > 0,
            Err(e) => {
                warn!(code, error = %e, "client delete failed");
                false
            }
        }
    }
}
