// Notification run arguments
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Args;

/// Notification run configuration
#[derive(Args, Debug, Clone, Default)]
pub struct NotifyArgs {
    /// Run the notification workflow over the scanned inventory
    #[arg(long = "notify")]
    pub enable: bool,

    /// Run as a scheduled job (honors the auto_notify setting)
    #[arg(long = "auto")]
    pub auto: bool,

    /// Override the notification threshold in days for this run
    #[arg(long = "threshold", value_name = "DAYS")]
    pub threshold: Option<i64>,

    /// Show who would be notified without sending or recording anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}
