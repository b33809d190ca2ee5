// Bundle Reader
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Opens an encrypted PKCS#12 bundle and extracts the leaf certificate's
// not-after timestamp. Failures are isolated per file; nothing here ever
// aborts a directory run.

use crate::error::BundleError;
use chrono::{DateTime, Utc};
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::error::ErrorStack;
use openssl::pkcs12::Pkcs12;
use std::fs;
use std::path::Path;

/// Seam for extracting an expiry timestamp from a bundle file.
///
/// The inventory builder only depends on this trait, so tests can inject a
/// stub reader instead of producing real encrypted bundles.
pub trait ExpiryReader: Send + Sync {
    /// Read the leaf certificate's not-after timestamp (UTC)
    fn read_expiry(&self, path: &Path, passphrase: &str) -> Result<DateTime<Utc>, BundleError>;
}

/// Production reader backed by OpenSSL's PKCS#12 parser.
///
/// OpenSSL decodes relaxed (non-strict-DER) containers, so malformed-but-
/// decodable encodings are accepted; only an undecodable container or a
/// missing certificate is reported as failure.
#[derive(Debug, Default)]
pub struct Pkcs12ExpiryReader;

impl Pkcs12ExpiryReader {
    pub fn new() -> Self {
        Self
    }
}

impl ExpiryReader for Pkcs12ExpiryReader {
    fn read_expiry(&self, path: &Path, passphrase: &str) -> Result<DateTime<Utc>, BundleError> {
        let data = fs::read(path)?;

        let pkcs12 = Pkcs12::from_der(&data).map_err(|e| BundleError::Malformed {
            details: first_reason(&e),
        })?;

        let parsed = pkcs12.parse2(passphrase).map_err(|e| {
            if is_mac_failure(&e) {
                BundleError::WrongPassphrase
            } else {
                BundleError::Malformed {
                    details: first_reason(&e),
                }
            }
        })?;

        let cert = parsed.cert.ok_or(BundleError::NoCertificate)?;

        asn1_to_datetime(cert.not_after()).ok_or_else(|| BundleError::Malformed {
            details: "certificate carries an unrepresentable notAfter time".to_string(),
        })
    }
}

/// Convert an ASN.1 time to `DateTime<Utc>` by diffing against the epoch
fn asn1_to_datetime(time: &Asn1TimeRef) -> Option<DateTime<Utc>> {
    let epoch = Asn1Time::from_unix(0).ok()?;
    let diff = epoch.diff(time).ok()?;
    let seconds = i64::from(diff.days) * 86_400 + i64::from(diff.secs);
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

/// A wrong passphrase surfaces as a MAC verification failure in the
/// OpenSSL error stack; any other decode error means the container itself
/// is broken.
fn is_mac_failure(stack: &ErrorStack) -> bool {
    stack.errors().iter().any(|e| {
        e.reason()
            .map(|r| r.to_ascii_lowercase().contains("mac"))
            .unwrap_or(false)
    })
}

fn first_reason(stack: &ErrorStack) -> String {
    stack
        .errors()
        .first()
        .and_then(|e| e.reason().map(str::to_string))
        .unwrap_or_else(|| "undecodable PKCS#12 container".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::hash::MessageDigest;
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;
    use openssl::x509::{X509, X509NameBuilder};
    use std::io::Write;

    /// Build a self-signed certificate and wrap it in a PKCS#12 bundle
    fn make_bundle(passphrase: &str, days_valid: u32) -> Vec<u8> {
        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", "Test Client").unwrap();
        let name = name.build();

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&pkey).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(days_valid).unwrap())
            .unwrap();
        builder.sign(&pkey, MessageDigest::sha256()).unwrap();
        let cert = builder.build();

        let pkcs12 = Pkcs12::builder()
            .name("test")
            .pkey(&pkey)
            .cert(&cert)
            .build2(passphrase)
            .unwrap();
        pkcs12.to_der().unwrap()
    }

    fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file
    }

    #[test]
    fn test_reads_expiry_from_valid_bundle() {
        let file = write_temp(&make_bundle("secret", 90));
        let reader = Pkcs12ExpiryReader::new();

        let expiry = reader.read_expiry(file.path(), "secret").unwrap();
        let days = (expiry - Utc::now()).num_days();
        assert!((89..=90).contains(&days), "unexpected days: {}", days);
    }

    #[test]
    fn test_wrong_passphrase_is_distinguished() {
        let file = write_temp(&make_bundle("secret", 30));
        let reader = Pkcs12ExpiryReader::new();

        let err = reader.read_expiry(file.path(), "not-it").unwrap_err();
        assert!(matches!(err, BundleError::WrongPassphrase));
    }

    #[test]
    fn test_garbage_data_is_malformed() {
        let file = write_temp(b"this is not a pkcs12 container");
        let reader = Pkcs12ExpiryReader::new();

        let err = reader.read_expiry(file.path(), "any").unwrap_err();
        assert!(matches!(err, BundleError::Malformed { .. }));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let reader = Pkcs12ExpiryReader::new();
        let err = reader
            .read_expiry(Path::new("/nonexistent/bundle.pfx"), "any")
            .unwrap_err();
        assert!(matches!(err, BundleError::Open { .. }));
    }

    #[test]
    fn test_asn1_conversion_round_trips_epoch_offset() {
        let time = Asn1Time::from_unix(1_700_000_000).unwrap();
        let converted = asn1_to_datetime(&time).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }
}
