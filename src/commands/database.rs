// DatabaseCommand - Database operations (init, history, stats)
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::Command;
use crate::{Args, Result};
use async_trait::async_trait;

/// DatabaseCommand handles database operations
///
/// This command is responsible for:
/// - Initializing the database (--db-init)
/// - Showing the recent notification history (--history)
/// - Printing aggregate statistics (--stats)
pub struct DatabaseCommand {
    args: Args,
}

impl DatabaseCommand {
    /// Create a new DatabaseCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for DatabaseCommand {
    async fn execute(&self) -> Result<()> {
        let db = super::open_database(&self.args).await?;

        // Opening the database already runs migrations
        if self.args.database.init {
            println!("✓ Database initialized successfully");
        }

        if self.args.database.history {
            let records = db
                .notifications()
                .list_recent(self.args.database.history_limit)
                .await?;

            println!("\nNotification History");
            println!("{}", "=".repeat(80));

            if records.is_empty() {
                println!("No notifications recorded");
            } else {
                for record in records {
                    let status = if record.succeeded { "sent" } else { "failed" };
                    println!(
                        "  {} - {} | {} | {}{}",
                        record.sent_at.format("%Y-%m-%d %H:%M:%S"),
                        record.client_code,
                        record.kind,
                        status,
                        record
                            .error_message
                            .as_deref()
                            .map(|e| format!(" ({})", e))
                            .unwrap_or_default()
                    );
                }
            }
        }

        if self.args.database.stats {
            let stats = db.statistics().await?;

            println!("\nStatistics");
            println!("{}", "=".repeat(80));
            println!("  Registered clients:      {}", stats.total_clients);
            println!("  Clients with email:      {}", stats.clients_with_email);
            println!("  Notifications sent:      {}", stats.notifications_sent);
            println!("  Sent this month:         {}", stats.notifications_this_month);
        }

        db.close().await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "DatabaseCommand"
    }
}
