// Output format arguments
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Output formats and display configuration
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the inventory as JSON to a file
    #[arg(long = "json", value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long = "json-pretty")]
    pub json_pretty: bool,

    /// Suppress the banner
    #[arg(long = "quiet", short = 'q')]
    pub quiet: bool,
}
