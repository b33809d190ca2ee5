// Dispatch Orchestration
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Walks the eligible recipient set, sends one message each, and records
// every attempt in the ledger. Send-then-record is atomic per recipient:
// the loop never moves on before the outcome is written.

use crate::db::models::NotificationKind;
use crate::db::traits::{ClientRegistry, NotificationLedger};
use crate::inventory::InventoryEntry;
use crate::notify::eligibility::{select_recipients, SkipReason};
use crate::notify::smtp::{MailTransport, OutboundEmail};
use crate::notify::template;
use crate::settings::AppSettings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of one recipient's processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Sent,
    Failed,
    SkippedNoEmail,
    SkippedNotRegistered,
    SkippedCooldown,
}

/// One line of run detail, enough to explain every entry afterwards
#[derive(Debug, Clone, Serialize)]
pub struct RunDetail {
    pub code: String,
    pub client_name: String,
    pub outcome: RunOutcome,
    pub message: String,
}

/// Aggregate result of one notification run
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped_no_email: usize,
    pub skipped_cooldown: usize,
    pub details: Vec<RunDetail>,
}

impl RunSummary {
    fn push(&mut self, code: &str, client_name: &str, outcome: RunOutcome, message: String) {
        match outcome {
            RunOutcome::Sent => self.sent += 1,
            RunOutcome::Failed => self.failed += 1,
            RunOutcome::SkippedNoEmail | RunOutcome::SkippedNotRegistered => {
                self.skipped_no_email += 1
            }
            RunOutcome::SkippedCooldown => self.skipped_cooldown += 1,
        }
        self.details.push(RunDetail {
            code: code.to_string(),
            client_name: client_name.to_string(),
            outcome,
            message,
        });
    }
}

/// Run the notification workflow over an already-built inventory.
///
/// When `automatic` is set, the run is a no-op summary unless automatic
/// notifications are enabled and SMTP is configured. A failed send is
/// recorded and left for the next scheduled run; only successful sends
/// reset the cooldown, so the next run re-admits failures immediately.
/// No retry happens within a single run.
pub async fn run_notifications(
    inventory: &[InventoryEntry],
    settings: &AppSettings,
    registry: &dyn ClientRegistry,
    ledger: &dyn NotificationLedger,
    transport: &dyn MailTransport,
    now: DateTime<Utc>,
    automatic: bool,
) -> crate::Result<RunSummary> {
    let mut summary = RunSummary::default();

    if automatic && !settings.auto_notify {
        info!("automatic notifications disabled; nothing to do");
        return Ok(summary);
    }

    if !settings.smtp_configured() {
        info!("SMTP sender or credential not configured; nothing to do");
        return Ok(summary);
    }

    let report =
        select_recipients(inventory, settings.notify_days, registry, ledger, now).await?;

    // Skips that are worth reporting per run; error rows and
    // above-threshold entries were never candidates
    for skipped in &report.skipped {
        match skipped.reason {
            SkipReason::NoEmail => {
                summary.processed += 1;
                summary.push(
                    &skipped.code,
                    &skipped.client_name,
                    RunOutcome::SkippedNoEmail,
                    "client has no email on file".to_string(),
                );
            }
            SkipReason::NotRegistered => {
                summary.processed += 1;
                summary.push(
                    &skipped.code,
                    &skipped.client_name,
                    RunOutcome::SkippedNotRegistered,
                    "client not registered".to_string(),
                );
            }
            SkipReason::Cooldown => {
                summary.processed += 1;
                summary.push(
                    &skipped.code,
                    &skipped.client_name,
                    RunOutcome::SkippedCooldown,
                    "already notified within the last 7 days".to_string(),
                );
            }
            SkipReason::ErrorStatus | SkipReason::AboveThreshold => {}
        }
    }

    for recipient in &report.eligible {
        summary.processed += 1;

        let email = OutboundEmail {
            to: recipient.email.clone(),
            subject: template::subject_line(recipient),
            html_body: template::html_body(recipient, &settings.office_name),
            text_body: template::text_body(recipient, &settings.office_name),
        };

        let kind = NotificationKind::from_days(recipient.days_remaining);

        match transport.send(&email).await {
            Ok(()) => {
                if !ledger.append(&recipient.code, kind, true, None).await {
                    // The send went out but the outcome was not durably
                    // recorded; surface it loudly since the cooldown will
                    // not cover this client until the next success
                    warn!(code = %recipient.code, "sent but ledger append failed");
                }
                info!(code = %recipient.code, to = %recipient.email, "notification sent");
                summary.push(
                    &recipient.code,
                    &recipient.client_name,
                    RunOutcome::Sent,
                    format!("email sent to {}", recipient.email),
                );
            }
            Err(failure) => {
                let message = failure.to_string();
                ledger
                    .append(&recipient.code, kind, false, Some(&message))
                    .await;
                warn!(code = %recipient.code, error = %message, "notification failed");
                summary.push(
                    &recipient.code,
                    &recipient.client_name,
                    RunOutcome::Failed,
                    message,
                );
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ClientRecord, NotificationRecord};
    use crate::error::SendFailure;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeRegistry {
        clients: HashMap<String, ClientRecord>,
    }

    #[async_trait]
    impl ClientRegistry for FakeRegistry {
        async fn get_client(&self, code: &str) -> crate::Result<Option<ClientRecord>> {
            Ok(self.clients.get(code).cloned())
        }
        async fn list_clients(&self) -> crate::Result<Vec<ClientRecord>> {
            Ok(Vec::new())
        }
        async fn upsert_client(&self, _record: &ClientRecord) -> bool {
            true
        }
        async fn delete_client(&self, _code: &str) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct RecordingLedger {
        rows: Mutex<Vec<(String, NotificationKind, bool, Option<String>)>>,
    }

    #[async_trait]
    impl NotificationLedger for RecordingLedger {
        async fn append(
            &self,
            client_code: &str,
            kind: NotificationKind,
            succeeded: bool,
            error_message: Option<&str>,
        ) -> bool {
            self.rows.lock().unwrap().push((
                client_code.to_string(),
                kind,
                succeeded,
                error_message.map(str::to_string),
            ));
            true
        }
        async fn last_successful(
            &self,
            _client_code: &str,
        ) -> crate::Result<Option<NotificationRecord>> {
            Ok(None)
        }
        async fn list_recent(&self, _limit: i64) -> crate::Result<Vec<NotificationRecord>> {
            Ok(Vec::new())
        }
    }

    /// Transport that fails for configured recipients and records sends
    #[derive(Default)]
    struct FakeTransport {
        fail_for: Vec<String>,
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl MailTransport for FakeTransport {
        async fn send(&self, email: &OutboundEmail) -> Result<(), SendFailure> {
            if self.fail_for.contains(&email.to) {
                return Err(SendFailure::RecipientRejected);
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
        async fn test_connection(&self) -> Result<(), SendFailure> {
            Ok(())
        }
    }

    fn entry(code: &str, name: &str, days: i64) -> InventoryEntry {
        let now = Utc::now();
        InventoryEntry {
            code: code.to_string(),
            client_name: name.to_string(),
            expiry: Some(now + Duration::days(days)),
            days_remaining: Some(days),
            status: crate::inventory::classify(days),
        }
    }

    fn registry(entries: &[(&str, &str)]) -> FakeRegistry {
        FakeRegistry {
            clients: entries
                .iter()
                .map(|(code, email)| {
                    (
                        code.to_string(),
                        ClientRecord::new(code.to_string(), format!("Client {}", code))
                            .with_email(email.to_string()),
                    )
                })
                .collect(),
        }
    }

    fn configured_settings() -> AppSettings {
        AppSettings {
            sender_email: "office@example.com".to_string(),
            smtp_credential: "pw".to_string(),
            auto_notify: true,
            ..AppSettings::default()
        }
    }

    #[tokio::test]
    async fn test_every_attempt_gets_one_ledger_row() {
        let inventory = vec![entry("001", "Acme", -2), entry("002", "Beta", 10)];
        let registry = registry(&[("001", "a@x.com"), ("002", "fail@x.com")]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport {
            fail_for: vec!["fail@x.com".to_string()],
            ..FakeTransport::default()
        };

        let summary = run_notifications(
            &inventory,
            &configured_settings(),
            &registry,
            &ledger,
            &transport,
            Utc::now(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);

        let rows = ledger.rows.lock().unwrap();
        assert_eq!(rows.len(), 2);

        let acme = rows.iter().find(|r| r.0 == "001").unwrap();
        assert_eq!(acme.1, NotificationKind::Overdue);
        assert!(acme.2);
        assert!(acme.3.is_none());

        let beta = rows.iter().find(|r| r.0 == "002").unwrap();
        assert_eq!(beta.1, NotificationKind::Upcoming);
        assert!(!beta.2);
        assert!(beta.3.as_deref().unwrap().contains("Recipient"));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let inventory = vec![
            entry("001", "Fails", 5),
            entry("002", "Works", 5),
            entry("003", "Works Too", 5),
        ];
        let registry = registry(&[
            ("001", "fail@x.com"),
            ("002", "b@x.com"),
            ("003", "c@x.com"),
        ]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport {
            fail_for: vec!["fail@x.com".to_string()],
            ..FakeTransport::default()
        };

        let summary = run_notifications(
            &inventory,
            &configured_settings(),
            &registry,
            &ledger,
            &transport,
            Utc::now(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_automatic_run_is_inert_when_disabled() {
        let inventory = vec![entry("001", "Acme", 5)];
        let registry = registry(&[("001", "a@x.com")]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport::default();

        let mut settings = configured_settings();
        settings.auto_notify = false;

        let summary = run_notifications(
            &inventory, &settings, &registry, &ledger, &transport,
            Utc::now(), true,
        )
        .await
        .unwrap();

        assert_eq!(summary.processed, 0);
        assert!(ledger.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_smtp_is_inert() {
        let inventory = vec![entry("001", "Acme", 5)];
        let registry = registry(&[("001", "a@x.com")]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport::default();

        let summary = run_notifications(
            &inventory,
            &AppSettings::default(),
            &registry,
            &ledger,
            &transport,
            Utc::now(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(summary.processed, 0);
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_manual_run_ignores_auto_flag() {
        let inventory = vec![entry("001", "Acme", 5)];
        let registry = registry(&[("001", "a@x.com")]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport::default();

        let mut settings = configured_settings();
        settings.auto_notify = false;

        let summary = run_notifications(
            &inventory, &settings, &registry, &ledger, &transport,
            Utc::now(), false,
        )
        .await
        .unwrap();

        assert_eq!(summary.sent, 1);
    }

    #[tokio::test]
    async fn test_subject_and_body_rendered_per_recipient() {
        let inventory = vec![entry("001", "Acme Ltda", 3)];
        let registry = registry(&[("001", "a@x.com")]);
        let ledger = RecordingLedger::default();
        let transport = FakeTransport::default();

        run_notifications(
            &inventory,
            &configured_settings(),
            &registry,
            &ledger,
            &transport,
            Utc::now(),
            false,
        )
        .await
        .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("URGENT"));
        assert!(sent[0].subject.contains("Acme Ltda"));
        assert!(sent[0].html_body.contains("Acme Ltda"));
    }
}
