// Inventory Module
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Scans a bundle directory and derives one classified entry per file

pub mod builder;
pub mod bundle;
pub mod filename;
pub mod status;

pub use builder::{build_inventory, Inventory, InventoryEntry};
pub use bundle::{ExpiryReader, Pkcs12ExpiryReader};
pub use filename::{parse_filename, CertificateFileName};
pub use status::{classify, CertStatus, WARNING_THRESHOLD_DAYS};
