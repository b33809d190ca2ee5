// Severity Tiers
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Four buckets driving the subject-line convention and the visual accent
// of a notification. Finer-grained than, and independent of, the
// three-state display classifier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Already expired (days <= 0)
    Critical,
    /// Expires within a week (1..=7)
    Urgent,
    /// Expires within a month (8..=30)
    Attention,
    /// Preventive heads-up (> 30)
    Informational,
}

impl Tier {
    /// Derive the tier from whole days remaining
    pub fn from_days(days_remaining: i64) -> Self {
        if days_remaining <= 0 {
            Tier::Critical
        } else if days_remaining <= 7 {
            Tier::Urgent
        } else if days_remaining <= 30 {
            Tier::Attention
        } else {
            Tier::Informational
        }
    }

    /// Accent color for the HTML body
    pub fn accent_color(&self) -> &'static str {
        match self {
            Tier::Critical | Tier::Urgent => "#dc3545",
            Tier::Attention => "#ffc107",
            Tier::Informational => "#28a745",
        }
    }

    /// Badge label shown in the message body
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Critical => "EXPIRED",
            Tier::Urgent => "URGENT",
            Tier::Attention => "ATTENTION",
            Tier::Informational => "NOTICE",
        }
    }

    /// One-line urgency guidance for the message body
    pub fn guidance(&self) -> &'static str {
        match self {
            Tier::Critical => {
                "The certificate has already expired and must be renewed immediately."
            }
            Tier::Urgent => "The deadline is very close. Please take immediate action.",
            Tier::Attention => "We recommend arranging the renewal as soon as possible.",
            Tier::Informational => "This is a preventive notice so you can plan ahead.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_days(-30), Tier::Critical);
        assert_eq!(Tier::from_days(0), Tier::Critical);
        assert_eq!(Tier::from_days(1), Tier::Urgent);
        assert_eq!(Tier::from_days(7), Tier::Urgent);
        assert_eq!(Tier::from_days(8), Tier::Attention);
        assert_eq!(Tier::from_days(30), Tier::Attention);
        assert_eq!(Tier::from_days(31), Tier::Informational);
    }

    #[test]
    fn test_tier_is_finer_than_classifier() {
        // Days 1 and 8 classify identically for display but sit in
        // different tiers
        use crate::inventory::classify;
        assert_eq!(classify(1), classify(8));
        assert_ne!(Tier::from_days(1), Tier::from_days(8));
    }

    #[test]
    fn test_accent_colors() {
        assert_eq!(Tier::Critical.accent_color(), Tier::Urgent.accent_color());
        assert_ne!(Tier::Attention.accent_color(), Tier::Critical.accent_color());
    }
}
