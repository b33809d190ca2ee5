// Commands module - Command Pattern implementation
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

mod command;
mod router;

// Individual command implementations
mod config;
mod database;
mod inventory;
mod notify;
mod registry;

pub use command::Command;
pub use router::CommandRouter;

// Re-export individual commands for testing purposes
pub use config::ConfigCommand;
pub use database::DatabaseCommand;
pub use inventory::InventoryCommand;
pub use notify::NotifyCommand;
pub use registry::RegistryCommand;

use crate::db::{CertDatabase, DatabaseConfig};
use crate::Args;

/// Open the database from `--db-config`, or the default local file
pub(crate) async fn open_database(args: &Args) -> crate::Result<CertDatabase> {
    match args.db_config_path() {
        Some(path) => CertDatabase::from_config_file(path).await,
        None => CertDatabase::new(&DatabaseConfig::default()).await,
    }
}
