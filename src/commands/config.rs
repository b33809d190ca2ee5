// ConfigCommand - Settings management
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::Command;
use crate::notify::{MailTransport, SmtpMailer};
use crate::settings::{
    encode_credential, AppSettings, KEY_AUTO_NOTIFY, KEY_NOTIFY_DAYS, KEY_OFFICE_NAME,
    KEY_SMTP_CREDENTIAL, KEY_SMTP_EMAIL, KEY_THEME,
};
use crate::{Args, Result};
use async_trait::async_trait;
use colored::Colorize;

const KNOWN_KEYS: &[&str] = &[
    KEY_SMTP_EMAIL,
    KEY_SMTP_CREDENTIAL,
    KEY_NOTIFY_DAYS,
    KEY_AUTO_NOTIFY,
    KEY_OFFICE_NAME,
    KEY_THEME,
];

/// ConfigCommand handles settings management
///
/// This command is responsible for:
/// - Setting configuration values (--set-config KEY=VALUE)
/// - Showing the current configuration (--show-config)
/// - Verifying SMTP connectivity (--test-smtp)
pub struct ConfigCommand {
    args: Args,
}

impl ConfigCommand {
    /// Create a new ConfigCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("--set-config expects KEY=VALUE (got '{}')", assignment))?;
        Ok((key.trim(), value))
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        let db = super::open_database(&self.args).await?;

        for assignment in &self.args.config.set {
            let (key, value) = Self::parse_assignment(assignment)?;

            if !KNOWN_KEYS.contains(&key) {
                println!(
                    "✗ Unknown key '{}'. Known keys: {}",
                    key,
                    KNOWN_KEYS.join(", ")
                );
                continue;
            }

            if key == KEY_NOTIFY_DAYS && value.parse::<i64>().map(|d| d < 0).unwrap_or(true) {
                println!("✗ {} must be a non-negative number (got '{}')", key, value);
                continue;
            }

            // The credential is obfuscated at rest
            let stored = if key == KEY_SMTP_CREDENTIAL {
                encode_credential(value)
            } else {
                value.to_string()
            };

            if db.settings().set_value(key, &stored).await {
                if key == KEY_SMTP_CREDENTIAL {
                    println!("✓ {} updated", key);
                } else {
                    println!("✓ {} = {}", key, value);
                }
            } else {
                println!("✗ Failed to save {}", key);
            }
        }

        if self.args.config.show {
            let app = AppSettings::load(db.settings()).await?;

            println!("\nConfiguration");
            println!("{}", "=".repeat(80));
            println!("  {}       {}", KEY_SMTP_EMAIL, display_or_unset(&app.sender_email));
            println!(
                "  {}  {}",
                KEY_SMTP_CREDENTIAL,
                if app.smtp_credential.is_empty() {
                    "(unset)".to_string()
                } else {
                    "********".to_string()
                }
            );
            println!("  {}      {}", KEY_NOTIFY_DAYS, app.notify_days);
            println!("  {}      {}", KEY_AUTO_NOTIFY, app.auto_notify);
            println!("  {}      {}", KEY_OFFICE_NAME, app.office_name);
            println!("  {}            {}", KEY_THEME, app.theme);
            println!(
                "  SMTP relay            {}:{}",
                crate::notify::smtp::DEFAULT_SMTP_SERVER,
                crate::notify::smtp::DEFAULT_SMTP_PORT
            );
        }

        if self.args.config.test_smtp {
            let app = AppSettings::load(db.settings()).await?;

            if !app.smtp_configured() {
                println!("{} SMTP is not configured", "✗".red());
            } else {
                let mailer = SmtpMailer::new(app.sender_email.clone(), app.smtp_credential.clone());
                match mailer.test_connection().await {
                    Ok(()) => println!("{} SMTP connection and authentication OK", "✓".green()),
                    Err(failure) => println!("{} SMTP test failed: {}", "✗".red(), failure),
                }
            }
        }

        db.close().await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConfigCommand"
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}
