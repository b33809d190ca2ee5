// Client Registry CSV Interchange
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Fixed Portuguese column set kept for compatibility with the
// spreadsheets the registry was historically maintained in.

use crate::db::models::ClientRecord;
use crate::db::traits::ClientRegistry;
use crate::error::CertError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// CSV row shape; the serde names ARE the header
#[derive(Debug, Serialize, Deserialize)]
struct ClientRow {
    codigo: String,
    razao_social: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    telefone: String,
    #[serde(default)]
    responsavel: String,
    #[serde(default)]
    observacoes: String,
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        Self {
            codigo: record.code.clone(),
            razao_social: record.legal_name.clone(),
            email: record.email.clone().unwrap_or_default(),
            telefone: record.phone.clone().unwrap_or_default(),
            responsavel: record.responsible.clone().unwrap_or_default(),
            observacoes: record.notes.clone().unwrap_or_default(),
        }
    }
}

impl ClientRow {
    fn into_record(self) -> ClientRecord {
        let nonempty = |s: String| if s.trim().is_empty() { None } else { Some(s) };
        ClientRecord {
            id: None,
            code: self.codigo.trim().to_string(),
            legal_name: self.razao_social.trim().to_string(),
            email: nonempty(self.email.trim().to_string()),
            phone: nonempty(self.telefone.trim().to_string()),
            responsible: nonempty(self.responsavel.trim().to_string()),
            notes: nonempty(self.observacoes.trim().to_string()),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }
}

/// Outcome of one CSV import
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Render the full registry as CSV text
pub fn render_clients_csv(clients: &[ClientRecord]) -> crate::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for client in clients {
        writer.serialize(ClientRow::from(client))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CertError::Other(format!("CSV writer flush failed: {}", e)))?;
    Ok(String::from_utf8(bytes)
        .map_err(|e| CertError::Other(format!("CSV output is not UTF-8: {}", e)))?)
}

/// Parse CSV text into client records, skipping rows without a code.
/// Returns the parsed records alongside the skipped-row count.
pub fn parse_clients_csv(data: &str) -> crate::Result<(Vec<ClientRecord>, usize)> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut records = Vec::new();
    let mut skipped = 0;

    for row in reader.deserialize::<ClientRow>() {
        let row = row.map_err(CertError::CsvError)?;
        if row.codigo.trim().is_empty() {
            skipped += 1;
            continue;
        }
        records.push(row.into_record());
    }

    Ok((records, skipped))
}

/// Export every registered client to a CSV file
pub async fn export_clients(registry: &dyn ClientRegistry, path: &Path) -> crate::Result<usize> {
    let clients = registry.list_clients().await?;
    let rendered = render_clients_csv(&clients)?;
    std::fs::write(path, rendered).map_err(|source| CertError::StorageError {
        path: path.to_path_buf(),
        source,
    })?;
    info!(count = clients.len(), path = %path.display(), "registry exported");
    Ok(clients.len())
}

/// Import clients from a CSV file, upserting each by code
pub async fn import_clients(
    registry: &dyn ClientRegistry,
    path: &Path,
) -> crate::Result<ImportSummary> {
    let data = std::fs::read_to_string(path).map_err(|source| CertError::StorageError {
        path: path.to_path_buf(),
        source,
    })?;

    let (records, mut skipped) = parse_clients_csv(&data)?;
    let mut imported = 0;

    for record in records {
        if registry.upsert_client(&record).await {
            imported += 1;
        } else {
            warn!(code = %record.code, "import row not saved");
            skipped += 1;
        }
    }

    info!(imported, skipped, "registry import finished");
    Ok(ImportSummary { imported, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_the_fixed_portuguese_set() {
        let clients = vec![ClientRecord::new("001".to_string(), "Acme".to_string())];
        let rendered = render_clients_csv(&clients).unwrap();
        assert!(rendered
            .starts_with("codigo,razao_social,email,telefone,responsavel,observacoes"));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let clients = vec![
            ClientRecord::new("001".to_string(), "Acme Ltda".to_string())
                .with_email("billing@acme.example".to_string())
                .with_phone("+55 11 99999-0000".to_string())
                .with_responsible("Maria".to_string()),
            ClientRecord::new("002".to_string(), "Beta, Inc".to_string()),
        ];

        let rendered = render_clients_csv(&clients).unwrap();
        let (parsed, skipped) = parse_clients_csv(&rendered).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].code, "001");
        assert_eq!(parsed[0].email.as_deref(), Some("billing@acme.example"));
        assert_eq!(parsed[0].responsible.as_deref(), Some("Maria"));
        // Comma in the legal name survives quoting
        assert_eq!(parsed[1].legal_name, "Beta, Inc");
        assert!(parsed[1].email.is_none());
    }

    #[test]
    fn test_rows_without_code_are_skipped() {
        let data = "codigo,razao_social,email,telefone,responsavel,observacoes\n\
                    001,Acme,a@x.com,,,\n\
                    ,Nameless,n@x.com,,,\n\
                    002,Beta,,,,\n";
        let (parsed, skipped) = parse_clients_csv(data).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_empty_optional_columns_become_none() {
        let data = "codigo,razao_social,email,telefone,responsavel,observacoes\n\
                    001,Acme,,,,\n";
        let (parsed, _) = parse_clients_csv(data).unwrap();
        assert!(parsed[0].email.is_none());
        assert!(parsed[0].phone.is_none());
        assert!(parsed[0].notes.is_none());
    }

    #[test]
    fn test_malformed_csv_is_an_error() {
        // Wrong column count on a data row
        let data = "codigo,razao_social\n001\n";
        assert!(parse_clients_csv(data).is_err());
    }
}
