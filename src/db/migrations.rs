// Database Migrations
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Embedded SQL migrations executed in order with _sqlx_migrations
// bookkeeping, so re-runs are idempotent and the binary carries its own
// schema.

use crate::db::connection::DatabasePool;

/// Migration files, embedded at compile time and applied in array order
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250115_001_create_clients",
        include_str!("../../migrations/20250115_001_create_clients.sql"),
    ),
    (
        "20250115_002_create_settings",
        include_str!("../../migrations/20250115_002_create_settings.sql"),
    ),
    (
        "20250115_003_create_notifications",
        include_str!("../../migrations/20250115_003_create_notifications.sql"),
    ),
];

/// Run all pending migrations
pub async fn run_migrations(pool: &DatabasePool) -> crate::Result<()> {
    let db = pool.inner();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _sqlx_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            success BOOLEAN NOT NULL,
            execution_time BIGINT NOT NULL,
            checksum BLOB NOT NULL
        )
        "#,
    )
    .execute(db)
    .await
    .map_err(|e| {
        crate::CertError::DatabaseError(format!("Failed to create migrations table: {}", e))
    })?;

    for (name, sql) in MIGRATIONS {
        let version = version_from_name(name)?;

        let already_run: bool =
            sqlx::query_scalar("SELECT COUNT(*) > 0 FROM _sqlx_migrations WHERE version = ?")
                .bind(version)
                .fetch_one(db)
                .await
                .map_err(|e| {
                    crate::CertError::DatabaseError(format!(
                        "Failed to check migration status: {}",
                        e
                    ))
                })?;

        if already_run {
            continue;
        }

        for statement in split_statements(sql) {
            sqlx::query(statement).execute(db).await.map_err(|e| {
                crate::CertError::DatabaseError(format!(
                    "Failed to execute migration {}: {}",
                    name, e
                ))
            })?;
        }

        let checksum_placeholder = vec![0u8; 16];
        sqlx::query(
            "INSERT INTO _sqlx_migrations (version, description, success, execution_time, checksum) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(version)
        .bind(name)
        .bind(true)
        .bind(0i64)
        .bind(&checksum_placeholder)
        .execute(db)
        .await
        .map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to record migration {}: {}", name, e))
        })?;
    }

    Ok(())
}

/// Extract the numeric version from a migration name
/// (e.g. "20250115_001_create_clients" -> 20250115001)
fn version_from_name(name: &str) -> crate::Result<i64> {
    let digits: String = name
        .chars()
        .take_while(|c| c.is_numeric() || *c == '_')
        .filter(|c| c.is_numeric())
        .collect();

    digits.parse().map_err(|_| {
        crate::CertError::DatabaseError(format!("Failed to parse migration version from {}", name))
            .into()
    })
}

/// Split a migration file into executable statements.
///
/// Naive on purpose: the schema files contain no string literals with
/// semicolons, and comment lines are stripped so a trailing comment does
/// not produce an empty statement.
fn split_statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.lines().all(|l| l.trim().starts_with("--") || l.trim().is_empty()))
}
