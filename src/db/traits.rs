// Database Traits
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Persistence boundary contracts for the registry, settings, and ledger.
//
// Writes report failure as `false` (logged, never an abort); reads return
// a Result because a storage-level read failure stops the calling phase.

use crate::db::models::{ClientRecord, NotificationKind, NotificationRecord};
use async_trait::async_trait;
use std::collections::HashMap;

/// Client registry: registered contact data, consulted by the eligibility
/// filter and maintained via explicit saves
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Look up one client by code
    async fn get_client(&self, code: &str) -> crate::Result<Option<ClientRecord>>;

    /// All registered clients, ordered by code
    async fn list_clients(&self) -> crate::Result<Vec<ClientRecord>>;

    /// Insert or update a client, keyed by code
    async fn upsert_client(&self, record: &ClientRecord) -> bool;

    /// Remove a client by code
    async fn delete_client(&self, code: &str) -> bool;
}

/// Opaque key/value configuration store
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_value(&self, key: &str) -> crate::Result<Option<String>>;

    async fn get_all(&self) -> crate::Result<HashMap<String, String>>;

    async fn set_value(&self, key: &str, value: &str) -> bool;

    /// Save several keys in one call; `false` if any write failed
    async fn set_values(&self, values: &[(String, String)]) -> bool;
}

/// Append-only notification history
#[async_trait]
pub trait NotificationLedger: Send + Sync {
    /// Record one notification attempt; new rows only
    async fn append(
        &self,
        client_code: &str,
        kind: NotificationKind,
        succeeded: bool,
        error_message: Option<&str>,
    ) -> bool;

    /// Most recent successful notification for a client, if any
    async fn last_successful(&self, client_code: &str)
        -> crate::Result<Option<NotificationRecord>>;

    /// Most recent attempts across all clients, newest first
    async fn list_recent(&self, limit: i64) -> crate::Result<Vec<NotificationRecord>>;
}
