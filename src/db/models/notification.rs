// Notification Record Model
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Append-only ledger rows; never updated or deleted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Kind of notification sent, derived from days remaining at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Certificate already expired when the notification went out
    Overdue,
    /// Certificate still valid but inside the notification window
    Upcoming,
}

impl NotificationKind {
    /// Derive the kind from days remaining
    pub fn from_days(days_remaining: i64) -> Self {
        if days_remaining <= 0 {
            NotificationKind::Overdue
        } else {
            NotificationKind::Upcoming
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Overdue => write!(f, "overdue"),
            NotificationKind::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// One notification attempt, success or failure
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub client_code: String,
    pub sent_at: DateTime<Utc>,
    pub kind: NotificationKind,
    pub succeeded: bool,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_days() {
        assert_eq!(NotificationKind::from_days(-10), NotificationKind::Overdue);
        assert_eq!(NotificationKind::from_days(0), NotificationKind::Overdue);
        assert_eq!(NotificationKind::from_days(1), NotificationKind::Upcoming);
        assert_eq!(NotificationKind::from_days(30), NotificationKind::Upcoming);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NotificationKind::Overdue.to_string(), "overdue");
        assert_eq!(NotificationKind::Upcoming.to_string(), "upcoming");
    }
}
