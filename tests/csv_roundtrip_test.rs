// Registry CSV interchange tests
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

use certsentry::db::{CertDatabase, ClientRecord, DatabaseConfig};
use certsentry::export::{export_clients, import_clients};

async fn open() -> CertDatabase {
    CertDatabase::new(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open")
}

#[tokio::test]
async fn test_export_then_import_restores_registry() {
    let source = open().await;

    let clients = vec![
        ClientRecord::new("001".to_string(), "Acme Ltda".to_string())
            .with_email("billing@acme.example".to_string())
            .with_phone("+55 11 99999-0000".to_string())
            .with_notes("prefers morning contact".to_string()),
        ClientRecord::new("002".to_string(), "Beta, Comercio e Servicos".to_string()),
    ];
    for client in &clients {
        assert!(source.clients().upsert_client(client).await);
    }

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("clients.csv");

    let exported = export_clients(source.clients(), &csv_path).await.unwrap();
    assert_eq!(exported, 2);
    source.close().await;

    // Import into a fresh database
    let target = open().await;
    let summary = import_clients(target.clients(), &csv_path).await.unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);

    let restored = target.clients().list_clients().await.unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[0].email.as_deref(), Some("billing@acme.example"));
    assert_eq!(
        restored[0].notes.as_deref(),
        Some("prefers morning contact")
    );
    // Comma inside a quoted field survives the round trip
    assert_eq!(restored[1].legal_name, "Beta, Comercio e Servicos");

    target.close().await;
}

#[tokio::test]
async fn test_import_skips_codeless_rows_and_upserts_by_code() {
    let db = open().await;

    let existing = ClientRecord::new("001".to_string(), "Old Name".to_string());
    assert!(db.clients().upsert_client(&existing).await);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("import.csv");
    std::fs::write(
        &csv_path,
        "codigo,razao_social,email,telefone,responsavel,observacoes\n\
         001,New Name,new@x.com,,,\n\
         ,Nameless,n@x.com,,,\n\
         002,Fresh Client,,,,\n",
    )
    .unwrap();

    let summary = import_clients(db.clients(), &csv_path).await.unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);

    let clients = db.clients().list_clients().await.unwrap();
    assert_eq!(clients.len(), 2);

    // The existing code was updated in place
    let first = db.clients().get_client("001").await.unwrap().unwrap();
    assert_eq!(first.legal_name, "New Name");
    assert_eq!(first.email.as_deref(), Some("new@x.com"));

    db.close().await;
}

#[tokio::test]
async fn test_import_missing_file_is_an_error() {
    let db = open().await;
    let result = import_clients(
        db.clients(),
        std::path::Path::new("/nonexistent/clients.csv"),
    )
    .await;
    assert!(result.is_err());
    db.close().await;
}
