// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use super::{
    Command, ConfigCommand, DatabaseCommand, InventoryCommand, NotifyCommand, RegistryCommand,
};
use crate::{Args, Result};

/// CommandRouter determines which Command to execute based on CLI
/// arguments
///
/// Priority-based routing:
/// 1. Settings management (--set-config, --show-config, --test-smtp)
/// 2. Registry maintenance (--import-csv, --export-csv, --list-clients,
///    --delete-client)
/// 3. Database-only operations (--db-init, --history, --stats) when no
///    bundle directory is given
/// 4. Notification run (--notify)
/// 5. Inventory scan (default, needs a directory)
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    pub fn route(args: Args) -> Result<Box<dyn Command>> {
        // Priority 1: settings management
        if args.has_config_ops() {
            return Ok(Box::new(ConfigCommand::new(args)));
        }

        // Priority 2: registry maintenance
        if args.has_registry_ops() {
            return Ok(Box::new(RegistryCommand::new(args)));
        }

        // Priority 3: database-only operations, no scan involved
        if args.has_database_ops() && args.directory.is_none() {
            return Ok(Box::new(DatabaseCommand::new(args)));
        }

        // Priority 4: notification run over the scanned inventory
        if args.notify.enable {
            return Ok(Box::new(NotifyCommand::new(args)));
        }

        // Priority 5: inventory scan (default)
        Ok(Box::new(InventoryCommand::new(args)))
    }

    /// Check that the argument combination can be routed sensibly
    pub fn validate_routing(args: &Args) -> Result<()> {
        let mode_count = [
            args.has_config_ops(),
            args.has_registry_ops(),
            args.notify.enable,
        ]
        .iter()
        .filter(|&&x| x)
        .count();

        if mode_count > 1 {
            anyhow::bail!(
                "Cannot combine multiple operational modes (settings, registry, --notify). \
                 Run them as separate invocations."
            );
        }

        Ok(())
    }
}
