// Export Module
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// CSV interchange for the client registry

pub mod csv;

pub use csv::{export_clients, import_clients, parse_clients_csv, render_clients_csv, ImportSummary};
