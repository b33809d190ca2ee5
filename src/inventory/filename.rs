// Filename Parser
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Derives the client identity and bundle passphrase from a bundle filename

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Recognized bundle filename shape:
    /// `<digits> - <client name> Senha <passphrase>.pfx`
    ///
    /// Case-insensitive on the `Senha` keyword and the extension. Spacing
    /// around the dash is optional; the client name is captured lazily so
    /// the first `Senha` keyword separates name from passphrase.
    static ref FILENAME_PATTERN: Regex =
        Regex::new(r"(?i)^(\d+)\s*-\s*(.+?)\s+Senha\s+(.+?)\.pfx$")
            .expect("invalid bundle filename pattern");
}

/// Ephemeral parse result for one bundle filename.
///
/// Discarded after the inventory row is built; the passphrase never
/// travels further than the bundle reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFileName {
    /// Client code, digits only, non-empty
    pub code: String,
    /// Client display name as written in the filename
    pub client_name: String,
    /// Passphrase for the bundle MAC/decryption
    pub passphrase: String,
}

/// Parse a bundle filename into its structured identity.
///
/// Returns `None` when the filename does not match the expected shape;
/// there are no partial results. A file missing the `Senha` keyword or the
/// digits prefix is wholly unparsed.
pub fn parse_filename(filename: &str) -> Option<CertificateFileName> {
    let captures = FILENAME_PATTERN.captures(filename)?;

    Some(CertificateFileName {
        code: captures[1].trim().to_string(),
        client_name: captures[2].trim().to_string(),
        passphrase: captures[3].trim().to_string(),
    })
}
