// Inventory table rendering
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use crate::inventory::{CertStatus, InventoryEntry};
use colored::{ColoredString, Colorize};

/// Tint a status label with its urgency color
fn status_label(status: CertStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        CertStatus::Valid => label.green(),
        CertStatus::Warning => label.yellow(),
        CertStatus::Expired => label.red().bold(),
        CertStatus::ErrorInvalidName | CertStatus::ErrorUnreadable => label.red(),
    }
}

/// Render the classified inventory as a fixed-width table
pub fn render_inventory(inventory: &[InventoryEntry]) -> String {
    let name_width = inventory
        .iter()
        .map(|e| e.client_name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<name_width$} {:<12} {:>6}  {}\n",
        "Code", "Name", "Expiry", "Days", "Status"
    ));
    out.push_str(&"-".repeat(name_width + 42));
    out.push('\n');

    for entry in inventory {
        let expiry = entry
            .expiry
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        let days = entry
            .days_remaining
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{:<8} {:<name_width$} {:<12} {:>6}  {}\n",
            entry.code,
            entry.client_name,
            expiry,
            days,
            status_label(entry.status)
        ));
    }

    out
}

/// One-line count summary per status bucket
pub fn render_summary(inventory: &[InventoryEntry]) -> String {
    let count = |pred: fn(&InventoryEntry) -> bool| inventory.iter().filter(|e| pred(e)).count();

    let expired = count(|e| e.status == CertStatus::Expired);
    let warning = count(|e| e.status == CertStatus::Warning);
    let valid = count(|e| e.status == CertStatus::Valid);
    let errors = count(|e| e.status.is_error());

    format!(
        "{} bundle(s): {} expired, {} expiring soon, {} valid, {} unreadable",
        inventory.len(),
        expired,
        warning,
        valid,
        errors
    )
}
