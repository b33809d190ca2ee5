// Client Record Model
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// One registered client, keyed by its unique code

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registered client contact data (the registry row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unique client code; upserts are keyed by this
    pub code: String,
    pub legal_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClientRecord {
    /// Create a new client record with only the required fields
    pub fn new(code: String, legal_name: String) -> Self {
        Self {
            id: None,
            code,
            legal_name,
            email: None,
            phone: None,
            responsible: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_phone(mut self, phone: String) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_responsible(mut self, responsible: String) -> Self {
        self.responsible = Some(responsible);
        self
    }

    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Whether the client can receive email notifications
    pub fn has_email(&self) -> bool {
        self.email.as_deref().map(|e| !e.is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_record_builder() {
        let client = ClientRecord::new("001".to_string(), "Acme Ltda".to_string())
            .with_email("billing@acme.example".to_string())
            .with_phone("+55 11 99999-0000".to_string());

        assert_eq!(client.code, "001");
        assert!(client.has_email());
        assert!(client.responsible.is_none());
    }

    #[test]
    fn test_empty_email_does_not_count() {
        let client =
            ClientRecord::new("002".to_string(), "Beta".to_string()).with_email(String::new());
        assert!(!client.has_email());
    }
}
