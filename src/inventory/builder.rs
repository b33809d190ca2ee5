// Inventory Builder
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Orchestrates filename parsing, bundle reading, and classification over a
// directory of bundle files, producing a soonest-expiring-first inventory.

use crate::inventory::bundle::ExpiryReader;
use crate::inventory::filename::parse_filename;
use crate::inventory::status::{classify, CertStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One row per bundle file found in the scanned directory.
///
/// Created fresh on every build, never mutated afterwards. Duplicate codes
/// across files are not deduplicated and appear as separate rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Client code from the filename, `"?"` when unparseable
    pub code: String,
    /// Client name from the filename, or the raw filename when unparseable
    pub client_name: String,
    /// Certificate not-after timestamp, present only on successful read
    pub expiry: Option<DateTime<Utc>>,
    /// Whole days until expiry (floored), absent when expiry is unknown
    pub days_remaining: Option<i64>,
    /// Classified status or explicit error state
    pub status: CertStatus,
}

/// A complete inventory for one run
pub type Inventory = Vec<InventoryEntry>;

/// Floor the signed distance between two instants to whole days.
///
/// Euclidean division keeps the floor semantics for negative distances:
/// a certificate 12 hours past expiry counts as -1 days, not 0.
fn whole_days_between(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_seconds().div_euclid(86_400)
}

/// Build the inventory for a directory of bundle files.
///
/// Fails closed: a missing or unlistable directory yields an empty
/// inventory so consumers always have something to render. Every file
/// failure becomes an explainable entry; no file aborts the run.
///
/// Output ordering: ascending by `days_remaining` with error entries
/// (no value) last, ties keeping listing order. No caching happens here;
/// every call re-reads every bundle.
pub fn build_inventory(dir: &Path, reader: &dyn ExpiryReader, now: DateTime<Utc>) -> Inventory {
    let mut filenames = match list_bundle_files(dir) {
        Some(names) => names,
        None => return Vec::new(),
    };

    // Sorted listing makes the tie-break order deterministic across platforms
    filenames.sort();

    let mut entries: Inventory = filenames
        .iter()
        .map(|filename| build_entry(dir, filename, reader, now))
        .collect();

    // Stable sort: equal keys (including all error rows at i64::MAX) keep
    // their listing order
    entries.sort_by_key(|e| e.days_remaining.unwrap_or(i64::MAX));

    entries
}

/// List bundle filenames in the directory, or `None` when the directory is
/// missing or cannot be listed
fn list_bundle_files(dir: &Path) -> Option<Vec<String>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "bundle directory unavailable");
            return None;
        }
    };

    let names = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| has_bundle_extension(name))
        .collect();

    Some(names)
}

fn has_bundle_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pfx")
}

fn build_entry(
    dir: &Path,
    filename: &str,
    reader: &dyn ExpiryReader,
    now: DateTime<Utc>,
) -> InventoryEntry {
    let parsed = match parse_filename(filename) {
        Some(parsed) => parsed,
        None => {
            debug!(filename, "filename does not match bundle pattern");
            return InventoryEntry {
                code: "?".to_string(),
                client_name: filename.to_string(),
                expiry: None,
                days_remaining: None,
                status: CertStatus::ErrorInvalidName,
            };
        }
    };

    match reader.read_expiry(&dir.join(filename), &parsed.passphrase) {
        Ok(expiry) => {
            let days = whole_days_between(expiry, now);
            InventoryEntry {
                code: parsed.code,
                client_name: parsed.client_name,
                expiry: Some(expiry),
                days_remaining: Some(days),
                status: classify(days),
            }
        }
        Err(e) => {
            debug!(filename, error = %e, "bundle unreadable");
            InventoryEntry {
                code: parsed.code,
                client_name: parsed.client_name,
                expiry: None,
                days_remaining: None,
                status: CertStatus::ErrorUnreadable,
            }
        }
    }
}
