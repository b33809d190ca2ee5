// CertSentry - Certificate inventory and expiry notification engine
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use certsentry::commands::CommandRouter;
use certsentry::Args;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    // Parse command line arguments
    let args = Args::parse();

    // Handle --version (display version and exit)
    if args.version {
        println!("CertSentry v{}", env!("CARGO_PKG_VERSION"));
        println!("Certificate inventory and expiry notification engine");
        println!("Licensed under GPL-3.0");
        return Ok(());
    }

    // Handle --db-config-example (generate example config and exit)
    if let Some(config_path) = &args.database.config_example {
        use certsentry::db::DatabaseConfig;
        DatabaseConfig::create_example_config(
            config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid file path"))?,
        )?;
        println!(
            "✓ Example database configuration saved to: {}",
            config_path.display()
        );
        return Ok(());
    }

    args.validate()?;
    CommandRouter::validate_routing(&args)?;

    display_banner(&args);

    let command = CommandRouter::route(args)?;
    info!(command = command.name(), "dispatching");
    command.execute().await?;

    Ok(())
}

fn display_banner(args: &Args) {
    if !args.output.quiet {
        println!(
            r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                    CertSentry v{:<8}                   ║
    ║    Certificate Inventory & Expiry Notification Engine    ║
    ╚═══════════════════════════════════════════════════════════╝
    "#,
            env!("CARGO_PKG_VERSION")
        );
    }
}
