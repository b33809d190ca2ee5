// Database configuration arguments
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Database persistence and history configuration
///
/// Arguments related to the SQLite store: configuration, initialization,
/// ledger history queries, and aggregate statistics.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database configuration file (TOML format)
    #[arg(long = "db-config", value_name = "FILE", id = "db_config")]
    pub config: Option<PathBuf>,

    /// Initialize the database (create tables and run migrations)
    #[arg(long = "db-init")]
    pub init: bool,

    /// Show recent notification history from the ledger
    #[arg(long = "history")]
    pub history: bool,

    /// Limit for history results
    #[arg(long = "history-limit", value_name = "COUNT", default_value = "20")]
    pub history_limit: i64,

    /// Show aggregate counters (clients, notifications sent)
    #[arg(long = "stats")]
    pub stats: bool,

    /// Generate example database configuration file
    #[arg(
        long = "db-config-example",
        value_name = "FILE",
        id = "db_config_example"
    )]
    pub config_example: Option<PathBuf>,
}
