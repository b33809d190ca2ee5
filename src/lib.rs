// CertSentry - Client certificate inventory and expiry notification engine
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

//! CertSentry inventories client digital-signature certificate bundles
//! (PKCS#12 `.pfx` files) stored in a directory, classifies each
//! certificate's expiry urgency, and drives a cooldown-gated email
//! notification workflow backed by a SQLite client registry and an
//! append-only notification ledger.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod export;
pub mod inventory;
pub mod notify;
pub mod output;
pub mod settings;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::error::{BundleError, CertError, SendFailure};
pub use crate::inventory::{CertStatus, Inventory, InventoryEntry};

/// Result type for CertSentry operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for CertSentry operations
pub use anyhow::Error;
