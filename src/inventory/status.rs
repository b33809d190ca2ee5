// Status Classifier
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Maps days-until-expiry to a display urgency, plus explicit error states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display classification threshold in days.
///
/// Fixed constant, independent of the configurable notification threshold:
/// the two coincide by default but classification (display) and eligibility
/// (sending) are separate knobs.
pub const WARNING_THRESHOLD_DAYS: i64 = 30;

/// Certificate status for one inventory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertStatus {
    /// More than 30 days remaining
    Valid,
    /// Expires within 30 days (inclusive of today)
    Warning,
    /// Already expired
    Expired,
    /// Filename did not match the expected shape
    ErrorInvalidName,
    /// Bundle could not be opened, decrypted, or held no certificate
    ErrorUnreadable,
}

impl CertStatus {
    /// Whether this status represents a per-file failure rather than a
    /// classified expiry state
    pub fn is_error(&self) -> bool {
        matches!(self, CertStatus::ErrorInvalidName | CertStatus::ErrorUnreadable)
    }
}

impl fmt::Display for CertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CertStatus::Valid => "Valid",
            CertStatus::Warning => "Warning",
            CertStatus::Expired => "Expired",
            CertStatus::ErrorInvalidName => "Error: invalid name",
            CertStatus::ErrorUnreadable => "Error: unreadable",
        };
        write!(f, "{}", label)
    }
}

/// Classify a certificate by whole days remaining until expiry.
///
/// Pure and exhaustive: negative is `Expired`, zero through the warning
/// threshold is `Warning`, beyond it is `Valid`.
pub fn classify(days_remaining: i64) -> CertStatus {
    if days_remaining < 0 {
        CertStatus::Expired
    } else if days_remaining <= WARNING_THRESHOLD_DAYS {
        CertStatus::Warning
    } else {
        CertStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_below_zero() {
        assert_eq!(classify(-1), CertStatus::Expired);
        assert_eq!(classify(-365), CertStatus::Expired);
    }

    #[test]
    fn test_warning_boundaries() {
        assert_eq!(classify(0), CertStatus::Warning);
        assert_eq!(classify(15), CertStatus::Warning);
        assert_eq!(classify(30), CertStatus::Warning);
    }

    #[test]
    fn test_valid_above_threshold() {
        assert_eq!(classify(31), CertStatus::Valid);
        assert_eq!(classify(3650), CertStatus::Valid);
    }

    #[test]
    fn test_error_states_are_flagged() {
        assert!(CertStatus::ErrorInvalidName.is_error());
        assert!(CertStatus::ErrorUnreadable.is_error());
        assert!(!CertStatus::Warning.is_error());
        assert!(!CertStatus::Expired.is_error());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(CertStatus::Expired.to_string(), "Expired");
        assert_eq!(CertStatus::ErrorUnreadable.to_string(), "Error: unreadable");
    }
}
