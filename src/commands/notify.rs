// NotifyCommand - Run the notification workflow
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::Command;
use crate::inventory::{build_inventory, Pkcs12ExpiryReader};
use crate::notify::{run_notifications, select_recipients, RunOutcome, SmtpMailer};
use crate::settings::AppSettings;
use crate::{Args, Result};
use async_trait::async_trait;
use chrono::Utc;
use colored::Colorize;

/// NotifyCommand scans the bundle directory and runs the notification
/// workflow over the resulting inventory
///
/// This command is responsible for:
/// - Building the inventory
/// - Selecting eligible recipients (threshold, registry, cooldown)
/// - Sending emails and recording every attempt in the ledger
/// - Dry-run preview (--dry-run)
pub struct NotifyCommand {
    args: Args,
}

impl NotifyCommand {
    /// Create a new NotifyCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for NotifyCommand {
    async fn execute(&self) -> Result<()> {
        let directory = self
            .args
            .directory
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("--notify needs a bundle directory"))?;

        let reader = Pkcs12ExpiryReader::new();
        let now = Utc::now();
        let inventory = build_inventory(directory, &reader, now);

        if inventory.is_empty() {
            println!("No .pfx bundles found in {}", directory.display());
            return Ok(());
        }

        let db = super::open_database(&self.args).await?;

        let mut settings = AppSettings::load(db.settings()).await?;
        if let Some(threshold) = self.args.notify.threshold {
            settings.notify_days = threshold;
        }

        if self.args.notify.dry_run {
            let report = select_recipients(
                &inventory,
                settings.notify_days,
                db.clients(),
                db.notifications(),
                now,
            )
            .await?;

            println!(
                "Dry run: {} of {} entries would be notified\n",
                report.eligible.len(),
                inventory.len()
            );
            for recipient in &report.eligible {
                println!(
                    "  {} {} ({}) -> {} [{} days]",
                    "✓".green(),
                    recipient.client_name,
                    recipient.code,
                    recipient.email,
                    recipient.days_remaining
                );
            }
            for skipped in &report.skipped {
                println!(
                    "  {} {} ({}): {}",
                    "-".dimmed(),
                    skipped.client_name,
                    skipped.code,
                    skipped.reason
                );
            }

            db.close().await;
            return Ok(());
        }

        if !settings.smtp_configured() {
            println!(
                "{} SMTP is not configured. Set smtp_email and smtp_credential first:",
                "✗".red()
            );
            println!("  certsentry --set-config smtp_email=office@example.com");
            println!("  certsentry --set-config smtp_credential=<app password>");
            db.close().await;
            return Ok(());
        }

        let mailer = SmtpMailer::new(
            settings.sender_email.clone(),
            settings.smtp_credential.clone(),
        );

        let summary = run_notifications(
            &inventory,
            &settings,
            db.clients(),
            db.notifications(),
            &mailer,
            now,
            self.args.notify.auto,
        )
        .await?;

        for detail in &summary.details {
            let marker = match detail.outcome {
                RunOutcome::Sent => "✓".green(),
                RunOutcome::Failed => "✗".red(),
                _ => "-".dimmed(),
            };
            println!(
                "  {} {} ({}): {}",
                marker, detail.client_name, detail.code, detail.message
            );
        }

        println!(
            "\n{} sent, {} failed, {} without email, {} in cooldown",
            summary.sent, summary.failed, summary.skipped_no_email, summary.skipped_cooldown
        );

        db.close().await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotifyCommand"
    }
}
