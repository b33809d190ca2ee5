// Database Configuration
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// SQLite-backed persistent store for the registry, settings, and ledger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database configuration
///
/// The store is single-process SQLite; the path is the only knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:` for tests
    pub path: PathBuf,
}

/// Full configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

impl DatabaseConfig {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// In-memory database, used by tests
    pub fn in_memory() -> Self {
        Self::new(PathBuf::from(":memory:"))
    }

    /// Generate the sqlx connection string
    pub fn connection_string(&self) -> String {
        let path_str = self.path.to_string_lossy();
        if path_str == ":memory:" {
            format!("sqlite:{}", path_str)
        } else if path_str.starts_with('/') {
            // Absolute UNIX path: sqlite:// plus the leading slash of the path
            format!("sqlite://{}", self.path.display())
        } else {
            format!("sqlite:{}", self.path.display())
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> crate::Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to read config: {}", e))
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to parse config: {}", e))
        })?;

        Ok(config)
    }

    /// Write an example configuration file
    pub fn create_example_config(path: &str) -> crate::Result<()> {
        let example = r#"[database]
# Path to the SQLite database file
path = "./certsentry.db"
"#;

        std::fs::write(path, example).map_err(|e| {
            crate::CertError::DatabaseError(format!("Failed to write config: {}", e))
        })?;

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("certsentry.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_connection_string() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.connection_string(), "sqlite::memory:");
    }

    #[test]
    fn test_absolute_path_connection_string() {
        let config = DatabaseConfig::new(PathBuf::from("/var/lib/certsentry.db"));
        assert_eq!(
            config.connection_string(),
            "sqlite:///var/lib/certsentry.db"
        );
    }

    #[test]
    fn test_relative_path_connection_string() {
        let config = DatabaseConfig::new(PathBuf::from("certsentry.db"));
        assert_eq!(config.connection_string(), "sqlite:certsentry.db");
    }
}
