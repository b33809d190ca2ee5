// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Parser;
use std::path::PathBuf;

// Sub-modules for organized CLI arguments
mod config_args;
mod database_args;
mod notify_args;
mod output_args;
mod registry_args;

// Re-export sub-structs
pub use config_args::ConfigArgs;
pub use database_args::DatabaseArgs;
pub use notify_args::NotifyArgs;
pub use output_args::OutputArgs;
pub use registry_args::RegistryArgs;

/// CertSentry - Certificate inventory and expiry notification engine
///
/// The main CLI arguments struct composes domain-specific sub-structs
/// using clap's #[command(flatten)] attribute:
/// - Bundle directory (positional)
/// - Database operations (DatabaseArgs)
/// - Client registry maintenance (RegistryArgs)
/// - Notification run (NotifyArgs)
/// - Settings management (ConfigArgs)
/// - Output formats (OutputArgs)
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
#[command(name = "certsentry")]
#[command(
    about = "Certificate inventory and expiry notification engine",
    long_about = None
)]
pub struct Args {
    /// Directory holding the `.pfx` certificate bundles
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    // ============ Database Operations ============
    #[command(flatten)]
    pub database: DatabaseArgs,

    // ============ Client Registry Maintenance ============
    #[command(flatten)]
    pub registry: RegistryArgs,

    // ============ Notification Run ============
    #[command(flatten)]
    pub notify: NotifyArgs,

    // ============ Settings Management ============
    #[command(flatten)]
    pub config: ConfigArgs,

    // ============ Output Formats and Display ============
    #[command(flatten)]
    pub output: OutputArgs,

    /// Display version information and exit
    #[arg(long = "version", short = 'V')]
    pub version: bool,
}

impl Args {
    /// Validate CLI arguments for mutual exclusivity and logical
    /// consistency
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.notify.enable && self.directory.is_none() {
            anyhow::bail!(
                "--notify needs a bundle directory. Pass the directory as the first argument."
            );
        }

        if self.notify.dry_run && !self.notify.enable {
            anyhow::bail!("--dry-run only makes sense together with --notify.");
        }

        if let Some(threshold) = self.notify.threshold {
            if threshold < 0 {
                anyhow::bail!("--threshold must be zero or positive (got {}).", threshold);
            }
        }

        for assignment in &self.config.set {
            if !assignment.contains('=') {
                anyhow::bail!(
                    "--set-config expects KEY=VALUE (got '{}').",
                    assignment
                );
            }
        }

        Ok(())
    }

    /// Whether any registry maintenance flag is active
    pub fn has_registry_ops(&self) -> bool {
        self.registry.import_csv.is_some()
            || self.registry.export_csv.is_some()
            || self.registry.list_clients
            || self.registry.delete_client.is_some()
    }

    /// Whether any settings management flag is active
    pub fn has_config_ops(&self) -> bool {
        !self.config.set.is_empty() || self.config.show || self.config.test_smtp
    }

    /// Whether any database-only flag is active
    pub fn has_database_ops(&self) -> bool {
        self.database.init
            || self.database.history
            || self.database.stats
            || self.database.config_example.is_some()
    }

    /// Resolve the database config path, defaulting next to the binary
    pub fn db_config_path(&self) -> Option<&str> {
        self.database.config.as_ref().and_then(|p| p.to_str())
    }
}
