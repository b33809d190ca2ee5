// Error types for CertSentry
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
//
// Structured error types using thiserror. Per-file and per-recipient
// failures carry their own enums so callers can assert on the specific
// cause instead of a generic failure string.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for CertSentry operations
#[derive(Debug, Error)]
pub enum CertError {
    /// Bundle could not be opened or decoded
    #[error("Bundle read failed: {0}")]
    Bundle(#[from] BundleError),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Storage access error (directory listing, file metadata)
    #[error("Storage error at {path}: {source}")]
    StorageError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Mail transport failure
    #[error("Mail transport failed: {0}")]
    Send(#[from] SendFailure),

    /// Invalid configuration or settings
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Invalid input from user or CLI
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// CSV import/export errors
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Generic I/O error
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Per-file bundle read failures (never abort the whole run)
///
/// Every variant maps to one observable cause: the file itself, the
/// passphrase, the container encoding, or an empty container. A bundle
/// that decodes with relaxed (non-strict-DER) encoding is not an error.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The file could not be opened or read
    #[error("Cannot open bundle: {source}")]
    Open {
        #[from]
        source: io::Error,
    },

    /// The passphrase did not verify against the bundle MAC
    #[error("Wrong passphrase for bundle")]
    WrongPassphrase,

    /// The container could not be decoded at all
    #[error("Malformed bundle: {details}")]
    Malformed { details: String },

    /// The bundle decoded but holds no certificate
    #[error("No certificate present in bundle")]
    NoCertificate,
}

/// Mail transport failure categories
///
/// Categorized into a small set of human-readable causes so every failed
/// attempt in the ledger explains itself.
#[derive(Debug, Clone, Error)]
pub enum SendFailure {
    #[error("SMTP authentication failed; check the sender email and app password")]
    Authentication,

    #[error("Could not connect to the SMTP server")]
    Connection,

    #[error("Recipient address was rejected by the server")]
    RecipientRejected,

    #[error("Invalid email address: {address}")]
    InvalidAddress { address: String },

    #[error("Send failed: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CertError {
    fn from(err: anyhow::Error) -> Self {
        CertError::Other(err.to_string())
    }
}

impl From<lettre::address::AddressError> for SendFailure {
    fn from(err: lettre::address::AddressError) -> Self {
        SendFailure::InvalidAddress {
            address: err.to_string(),
        }
    }
}

impl From<lettre::error::Error> for SendFailure {
    fn from(err: lettre::error::Error) -> Self {
        SendFailure::Other(format!("Message build error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_error_messages() {
        let err = BundleError::WrongPassphrase;
        assert!(err.to_string().contains("passphrase"));

        let err = BundleError::Malformed {
            details: "bad ASN.1".to_string(),
        };
        assert!(err.to_string().contains("bad ASN.1"));
    }

    #[test]
    fn test_send_failure_is_human_readable() {
        let msg = SendFailure::Authentication.to_string();
        assert!(msg.contains("authentication"));

        let msg = SendFailure::RecipientRejected.to_string();
        assert!(msg.contains("Recipient"));
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: CertError = io_err.into();
        assert!(matches!(err, CertError::IoError { .. }));
    }

    #[test]
    fn test_bundle_error_wraps_into_cert_error() {
        let err: CertError = BundleError::NoCertificate.into();
        assert!(matches!(err, CertError::Bundle(BundleError::NoCertificate)));
    }
}
