// Notification Eligibility Filter
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Cross-references the inventory against the registry and the ledger's
// cooldown rule to produce the recipient set for one run. Reads only;
// no sends, no writes.

use crate::db::traits::{ClientRegistry, NotificationLedger};
use crate::inventory::InventoryEntry;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

/// Minimum days since the last successful notification before another may
/// be sent. Fixed, independent of the threshold setting: at exactly 7 days
/// of age the code is still excluded, strictly older is re-admitted.
pub const COOLDOWN_DAYS: i64 = 7;

/// One entry admitted for notification
#[derive(Debug, Clone, Serialize)]
pub struct Recipient {
    pub code: String,
    pub client_name: String,
    pub email: String,
    pub days_remaining: i64,
    pub expiry: DateTime<Utc>,
}

/// Why an inventory entry was excluded from the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Entry is an error row or has no expiry value
    ErrorStatus,
    /// Days remaining exceed the notification threshold
    AboveThreshold,
    /// No registered client matches the code
    NotRegistered,
    /// Client is registered but has no email
    NoEmail,
    /// A successful notification went out within the cooldown window
    Cooldown,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::ErrorStatus => "entry has an error status",
            SkipReason::AboveThreshold => "above the notification threshold",
            SkipReason::NotRegistered => "client not registered",
            SkipReason::NoEmail => "client has no email on file",
            SkipReason::Cooldown => "notified successfully within the last 7 days",
        };
        write!(f, "{}", label)
    }
}

/// One excluded entry with its explicit reason
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub code: String,
    pub client_name: String,
    pub reason: SkipReason,
}

/// Result of one eligibility pass over the inventory
#[derive(Debug, Default, Serialize)]
pub struct EligibilityReport {
    pub eligible: Vec<Recipient>,
    pub skipped: Vec<SkippedEntry>,
}

/// Select the recipients for one notification run.
///
/// The skip rules apply in order; the first matching rule names the
/// reason. Error rows are excluded silently from the skip list only when
/// they never had a chance to qualify (they still appear, with
/// `ErrorStatus`, so every exclusion is explainable).
pub async fn select_recipients(
    inventory: &[InventoryEntry],
    threshold_days: i64,
    registry: &dyn ClientRegistry,
    ledger: &dyn NotificationLedger,
    now: DateTime<Utc>,
) -> crate::Result<EligibilityReport> {
    let mut report = EligibilityReport::default();

    for entry in inventory {
        let skip = |reason: SkipReason| SkippedEntry {
            code: entry.code.clone(),
            client_name: entry.client_name.clone(),
            reason,
        };

        let (days, expiry) = match (entry.days_remaining, entry.expiry) {
            (Some(days), Some(expiry)) if !entry.status.is_error() => (days, expiry),
            _ => {
                report.skipped.push(skip(SkipReason::ErrorStatus));
                continue;
            }
        };

        if days > threshold_days {
            report.skipped.push(skip(SkipReason::AboveThreshold));
            continue;
        }

        let client = match registry.get_client(&entry.code).await? {
            Some(client) => client,
            None => {
                report.skipped.push(skip(SkipReason::NotRegistered));
                continue;
            }
        };

        let email = match client.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                report.skipped.push(skip(SkipReason::NoEmail));
                continue;
            }
        };

        if let Some(last) = ledger.last_successful(&entry.code).await? {
            if now - last.sent_at <= Duration::days(COOLDOWN_DAYS) {
                report.skipped.push(skip(SkipReason::Cooldown));
                continue;
            }
        }

        report.eligible.push(Recipient {
            code: entry.code.clone(),
            client_name: entry.client_name.clone(),
            email,
            days_remaining: days,
            expiry,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ClientRecord, NotificationKind, NotificationRecord};
    use crate::inventory::CertStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeRegistry {
        clients: HashMap<String, ClientRecord>,
    }

    #[async_trait]
    impl ClientRegistry for FakeRegistry {
        async fn get_client(&self, code: &str) -> crate::Result<Option<ClientRecord>> {
            Ok(self.clients.get(code).cloned())
        }

        async fn list_clients(&self) -> crate::Result<Vec<ClientRecord>> {
            Ok(self.clients.values().cloned().collect())
        }

        async fn upsert_client(&self, _record: &ClientRecord) -> bool {
            true
        }

        async fn delete_client(&self, _code: &str) -> bool {
            true
        }
    }

    struct FakeLedger {
        last_success: HashMap<String, DateTime<Utc>>,
    }

    #[async_trait]
    impl NotificationLedger for FakeLedger {
        async fn append(
            &self,
            _client_code: &str,
            _kind: NotificationKind,
            _succeeded: bool,
            _error_message: Option<&str>,
        ) -> bool {
            true
        }

        async fn last_successful(
            &self,
            client_code: &str,
        ) -> crate::Result<Option<NotificationRecord>> {
            Ok(self.last_success.get(client_code).map(|sent_at| {
                NotificationRecord {
                    id: Some(1),
                    client_code: client_code.to_string(),
                    sent_at: *sent_at,
                    kind: NotificationKind::Upcoming,
                    succeeded: true,
                    error_message: None,
                }
            }))
        }

        async fn list_recent(&self, _limit: i64) -> crate::Result<Vec<NotificationRecord>> {
            Ok(Vec::new())
        }
    }

    fn entry(code: &str, name: &str, days: Option<i64>, status: CertStatus) -> InventoryEntry {
        let now = Utc::now();
        InventoryEntry {
            code: code.to_string(),
            client_name: name.to_string(),
            expiry: days.map(|d| now + Duration::days(d)),
            days_remaining: days,
            status,
        }
    }

    fn registry_with(entries: &[(&str, Option<&str>)]) -> FakeRegistry {
        let clients = entries
            .iter()
            .map(|(code, email)| {
                let mut record =
                    ClientRecord::new(code.to_string(), format!("Client {}", code));
                if let Some(email) = email {
                    record = record.with_email(email.to_string());
                }
                (code.to_string(), record)
            })
            .collect();
        FakeRegistry { clients }
    }

    fn empty_ledger() -> FakeLedger {
        FakeLedger {
            last_success: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_each_exclusion_reason_is_isolated() {
        let inventory = vec![
            entry("001", "Expired Co", Some(-5), CertStatus::Expired),
            entry("002", "Soon Co", Some(10), CertStatus::Warning),
            entry("003", "Far Co", Some(90), CertStatus::Valid),
            entry("?", "broken.pfx", None, CertStatus::ErrorInvalidName),
            entry("004", "No Email Co", Some(5), CertStatus::Warning),
            entry("005", "Unknown Co", Some(5), CertStatus::Warning),
        ];

        let registry = registry_with(&[
            ("001", Some("a@x.com")),
            ("002", Some("beta@x.com")),
            ("003", Some("c@x.com")),
            ("004", None),
        ]);

        let report = select_recipients(&inventory, 30, &registry, &empty_ledger(), Utc::now())
            .await
            .unwrap();

        let eligible_codes: Vec<&str> =
            report.eligible.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(eligible_codes, vec!["001", "002"]);

        let reason_for = |code: &str| {
            report
                .skipped
                .iter()
                .find(|s| s.code == code)
                .map(|s| s.reason)
        };
        assert_eq!(reason_for("003"), Some(SkipReason::AboveThreshold));
        assert_eq!(reason_for("?"), Some(SkipReason::ErrorStatus));
        assert_eq!(reason_for("004"), Some(SkipReason::NoEmail));
        assert_eq!(reason_for("005"), Some(SkipReason::NotRegistered));
    }

    #[tokio::test]
    async fn test_spec_scenario_single_eligible_recipient() {
        let inventory = vec![
            entry("001", "Acme", Some(-5), CertStatus::Expired),
            entry("002", "Beta", Some(10), CertStatus::Warning),
            entry("?", "bad.pfx", None, CertStatus::ErrorInvalidName),
        ];

        // Only 002 has a registered email
        let registry = registry_with(&[("002", Some("beta@x.com"))]);

        let report = select_recipients(&inventory, 30, &registry, &empty_ledger(), Utc::now())
            .await
            .unwrap();

        assert_eq!(report.eligible.len(), 1);
        let recipient = &report.eligible[0];
        assert_eq!(recipient.code, "002");
        assert_eq!(recipient.client_name, "Beta");
        assert_eq!(recipient.email, "beta@x.com");
        assert_eq!(recipient.days_remaining, 10);
    }

    #[tokio::test]
    async fn test_cooldown_boundary_day_seven_excluded_day_eight_included() {
        let now = Utc::now();
        let inventory = vec![entry("001", "Acme", Some(3), CertStatus::Warning)];
        let registry = registry_with(&[("001", Some("a@x.com"))]);

        // Success exactly 7 days ago: still excluded
        let ledger = FakeLedger {
            last_success: HashMap::from([("001".to_string(), now - Duration::days(7))]),
        };
        let report = select_recipients(&inventory, 30, &registry, &ledger, now)
            .await
            .unwrap();
        assert!(report.eligible.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::Cooldown);

        // Success 8 days ago: re-admitted
        let ledger = FakeLedger {
            last_success: HashMap::from([("001".to_string(), now - Duration::days(8))]),
        };
        let report = select_recipients(&inventory, 30, &registry, &ledger, now)
            .await
            .unwrap();
        assert_eq!(report.eligible.len(), 1);
    }

    #[tokio::test]
    async fn test_eligible_is_subset_of_inventory() {
        let inventory = vec![
            entry("001", "A", Some(1), CertStatus::Warning),
            entry("002", "B", Some(2), CertStatus::Warning),
        ];
        let registry = registry_with(&[("001", Some("a@x.com")), ("002", Some("b@x.com"))]);

        let report = select_recipients(&inventory, 30, &registry, &empty_ledger(), Utc::now())
            .await
            .unwrap();

        assert_eq!(report.eligible.len() + report.skipped.len(), inventory.len());
        for recipient in &report.eligible {
            assert!(inventory.iter().any(|e| e.code == recipient.code));
        }
    }

    #[tokio::test]
    async fn test_threshold_is_the_callers_knob() {
        let inventory = vec![entry("001", "A", Some(10), CertStatus::Warning)];
        let registry = registry_with(&[("001", Some("a@x.com"))]);

        let report = select_recipients(&inventory, 5, &registry, &empty_ledger(), Utc::now())
            .await
            .unwrap();
        assert!(report.eligible.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::AboveThreshold);
    }
}
