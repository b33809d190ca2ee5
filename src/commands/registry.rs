// RegistryCommand - Client registry maintenance
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::Command;
use crate::export::{export_clients, import_clients};
use crate::{Args, Result};
use async_trait::async_trait;

/// RegistryCommand handles client registry maintenance
///
/// This command is responsible for:
/// - CSV import (--import-csv) and export (--export-csv)
/// - Listing registered clients (--list-clients)
/// - Deleting a client by code (--delete-client)
pub struct RegistryCommand {
    args: Args,
}

impl RegistryCommand {
    /// Create a new RegistryCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for RegistryCommand {
    async fn execute(&self) -> Result<()> {
        let db = super::open_database(&self.args).await?;

        if let Some(csv_file) = &self.args.registry.import_csv {
            let summary = import_clients(db.clients(), csv_file).await?;
            println!(
                "✓ Imported {} client(s) from {} ({} row(s) skipped)",
                summary.imported,
                csv_file.display(),
                summary.skipped
            );
        }

        if let Some(csv_file) = &self.args.registry.export_csv {
            let count = export_clients(db.clients(), csv_file).await?;
            println!("✓ Exported {} client(s) to {}", count, csv_file.display());
        }

        if self.args.registry.list_clients {
            let clients = db.clients().list_clients().await?;

            println!("\nRegistered Clients ({})", clients.len());
            println!("{}", "=".repeat(80));

            if clients.is_empty() {
                println!("No clients registered");
            } else {
                for client in clients {
                    println!(
                        "  {} - {} | {}",
                        client.code,
                        client.legal_name,
                        client.email.as_deref().unwrap_or("(no email)")
                    );
                }
            }
        }

        if let Some(code) = &self.args.registry.delete_client {
            if db.clients().delete_client(code).await {
                println!("✓ Client {} deleted", code);
            } else {
                println!("✗ Client {} not found or not deleted", code);
            }
        }

        db.close().await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "RegistryCommand"
    }
}
