// Client registry arguments
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Client registry maintenance
///
/// CSV interchange and direct registry edits. The CSV column set is
/// fixed: codigo, razao_social, email, telefone, responsavel,
/// observacoes.
#[derive(Args, Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Import clients from a CSV file (upserts by code)
    #[arg(long = "import-csv", value_name = "FILE")]
    pub import_csv: Option<PathBuf>,

    /// Export all registered clients to a CSV file
    #[arg(long = "export-csv", value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// List all registered clients
    #[arg(long = "list-clients")]
    pub list_clients: bool,

    /// Delete one client by code
    #[arg(long = "delete-client", value_name = "CODE")]
    pub delete_client: Option<String>,
}
