// Settings management arguments
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Args;

/// Settings management
///
/// Known keys: smtp_email, smtp_credential, notify_days, auto_notify,
/// office_name, theme.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Set a configuration value (repeatable)
    #[arg(long = "set-config", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Show the current configuration (credential redacted)
    #[arg(long = "show-config")]
    pub show: bool,

    /// Verify the SMTP relay accepts the configured credentials
    #[arg(long = "test-smtp")]
    pub test_smtp: bool,
}
