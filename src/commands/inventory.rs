// InventoryCommand - Scan a bundle directory and display the inventory
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::Command;
use crate::inventory::{build_inventory, Pkcs12ExpiryReader};
use crate::output::table;
use crate::{Args, Result};
use async_trait::async_trait;
use chrono::Utc;

/// InventoryCommand scans the bundle directory and renders the
/// classified inventory
///
/// This command is responsible for:
/// - Scanning the directory for `.pfx` bundles
/// - Displaying the inventory table
/// - Exporting JSON (--json)
/// - Printing aggregate statistics (--stats)
pub struct InventoryCommand {
    args: Args,
}

impl InventoryCommand {
    /// Create a new InventoryCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for InventoryCommand {
    async fn execute(&self) -> Result<()> {
        let directory = match &self.args.directory {
            Some(dir) => dir,
            None => {
                anyhow::bail!(
                    "No bundle directory given. Usage: certsentry <DIR> [options]"
                );
            }
        };

        let reader = Pkcs12ExpiryReader::new();
        let inventory = build_inventory(directory, &reader, Utc::now());

        if inventory.is_empty() {
            println!("No .pfx bundles found in {}", directory.display());
        } else {
            println!("{}", table::render_inventory(&inventory));
            println!("{}", table::render_summary(&inventory));
        }

        if let Some(json_file) = &self.args.output.json {
            let json = if self.args.output.json_pretty {
                serde_json::to_string_pretty(&inventory)?
            } else {
                serde_json::to_string(&inventory)?
            };
            std::fs::write(json_file, &json)?;
            println!("✓ Inventory exported to JSON: {}", json_file.display());
        }

        if self.args.database.stats {
            let db = super::open_database(&self.args).await?;
            let stats = db.statistics().await?;
            println!("\nRegistry: {} client(s), {} with email", stats.total_clients, stats.clients_with_email);
            println!(
                "Notifications: {} sent total, {} this month",
                stats.notifications_sent, stats.notifications_this_month
            );
            db.close().await;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "InventoryCommand"
    }
}
