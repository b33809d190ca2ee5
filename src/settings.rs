// Application Settings
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Typed view over the opaque key/value configuration rows, plus the
// reversible obfuscation applied to the SMTP credential at rest.

use crate::db::traits::ConfigStore;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const KEY_SMTP_EMAIL: &str = "smtp_email";
pub const KEY_SMTP_CREDENTIAL: &str = "smtp_credential";
pub const KEY_NOTIFY_DAYS: &str = "notify_days";
pub const KEY_AUTO_NOTIFY: &str = "auto_notify";
pub const KEY_OFFICE_NAME: &str = "office_name";
pub const KEY_THEME: &str = "theme";

pub const DEFAULT_NOTIFY_DAYS: i64 = 30;
pub const DEFAULT_OFFICE_NAME: &str = "Accounting Office";

/// Process-wide settings, loaded at session start.
///
/// `smtp_credential` holds the decoded (usable) credential in memory; the
/// stored value is base64-obfuscated. That is obfuscation, not encryption:
/// the store contract stays opaque strings either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Sender identity for outgoing mail
    pub sender_email: String,
    /// SMTP app password, decoded for use
    pub smtp_credential: String,
    /// Office display name used in email signatures
    pub office_name: String,
    /// Notification eligibility threshold in days
    pub notify_days: i64,
    /// Whether the automatic notification run is enabled
    pub auto_notify: bool,
    /// Display theme flag (presentation layer concern, persisted here)
    pub theme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sender_email: String::new(),
            smtp_credential: String::new(),
            office_name: DEFAULT_OFFICE_NAME.to_string(),
            notify_days: DEFAULT_NOTIFY_DAYS,
            auto_notify: false,
            theme: "light".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the config store, falling back to defaults for
    /// absent or unparseable values
    pub async fn load(store: &dyn ConfigStore) -> crate::Result<Self> {
        let values = store.get_all().await?;
        let defaults = Self::default();

        let get = |key: &str| values.get(key).cloned();

        Ok(Self {
            sender_email: get(KEY_SMTP_EMAIL).unwrap_or(defaults.sender_email),
            smtp_credential: get(KEY_SMTP_CREDENTIAL)
                .map(|v| decode_credential(&v))
                .unwrap_or(defaults.smtp_credential),
            office_name: get(KEY_OFFICE_NAME)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.office_name),
            notify_days: get(KEY_NOTIFY_DAYS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notify_days),
            auto_notify: get(KEY_AUTO_NOTIFY)
                .map(|v| v == "true")
                .unwrap_or(defaults.auto_notify),
            theme: get(KEY_THEME)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.theme),
        })
    }

    /// Persist all settings; `false` if any write failed
    pub async fn save(&self, store: &dyn ConfigStore) -> bool {
        let values = vec![
            (KEY_SMTP_EMAIL.to_string(), self.sender_email.clone()),
            (
                KEY_SMTP_CREDENTIAL.to_string(),
                encode_credential(&self.smtp_credential),
            ),
            (KEY_OFFICE_NAME.to_string(), self.office_name.clone()),
            (KEY_NOTIFY_DAYS.to_string(), self.notify_days.to_string()),
            (KEY_AUTO_NOTIFY.to_string(), self.auto_notify.to_string()),
            (KEY_THEME.to_string(), self.theme.clone()),
        ];

        store.set_values(&values).await
    }

    /// Whether the SMTP side is configured enough to attempt sends
    pub fn smtp_configured(&self) -> bool {
        !self.sender_email.is_empty() && !self.smtp_credential.is_empty()
    }
}

/// Obfuscate a credential for storage (reversible encoding, not encryption)
pub fn encode_credential(credential: &str) -> String {
    if credential.is_empty() {
        return String::new();
    }
    BASE64.encode(credential.as_bytes())
}

/// Reverse the storage obfuscation; undecodable input yields an empty
/// string rather than an error, matching "credential not usable"
pub fn decode_credential(encoded: &str) -> String {
    if encoded.is_empty() {
        return String::new();
    }
    BASE64
        .decode(encoded.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_round_trip() {
        let encoded = encode_credential("s3nh4-de-app");
        assert_ne!(encoded, "s3nh4-de-app");
        assert_eq!(decode_credential(&encoded), "s3nh4-de-app");
    }

    #[test]
    fn test_empty_credential_stays_empty() {
        assert_eq!(encode_credential(""), "");
        assert_eq!(decode_credential(""), "");
    }

    #[test]
    fn test_garbage_credential_decodes_to_empty() {
        assert_eq!(decode_credential("not base64 at all!!!"), "");
    }

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.notify_days, 30);
        assert!(!settings.auto_notify);
        assert!(!settings.smtp_configured());
    }

    #[test]
    fn test_smtp_configured_needs_both_fields() {
        let mut settings = AppSettings::default();
        settings.sender_email = "office@example.com".to_string();
        assert!(!settings.smtp_configured());
        settings.smtp_credential = "pw".to_string();
        assert!(settings.smtp_configured());
    }
}
