// Database Models
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Row types for the client registry and the notification ledger

pub mod client;
pub mod notification;

pub use client::ClientRecord;
pub use notification::{NotificationKind, NotificationRecord};
