//! Integration tests for running the event handler from the command line

use clap::Parser;
use gdpr_obfuscator::adapters::storage::InMemoryStorage;
use gdpr_obfuscator::cli::Cli;
use gdpr_obfuscator::config::load_config_or_default;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_event_flag_masks_upload_with_configured_fields() {
    let dir = TempDir::new().unwrap();
    let event = write_file(
        &dir,
        "event.json",
        &json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "ingest" },
                    "object": { "key": "new_data/students.csv" }
                }
            }]
        })
        .to_string(),
    );

    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(
            br#"
[storage]
backend = "memory"

[handler]
pii_fields = ["name", "email_address"]
output_prefix = "masked/"
"#,
        )
        .unwrap();
    config_file.flush().unwrap();
    let config_path = config_file.path().to_string_lossy().into_owned();

    let cli = Cli::parse_from(["gdpr-obfuscator", "--config", &config_path, "--event", &event]);
    let config = load_config_or_default(cli.config.as_deref()).unwrap();

    let storage = Arc::new(InMemoryStorage::new().with_object(
        "ingest",
        "new_data/students.csv",
        "student_id,name,email_address\n1234,John Smith,j@example.com\n",
    ));

    let code = cli.args.run_with_storage(&config, storage.clone()).await.unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        storage.object("ingest", "masked/new_data/students.csv").unwrap(),
        b"student_id,name,email_address\n1234,***,***\n"
    );
    assert_eq!(
        storage.object("ingest", "new_data/students.csv").unwrap(),
        b"student_id,name,email_address\n1234,John Smith,j@example.com\n"
    );
}

#[tokio::test]
async fn test_event_flag_reports_malformed_event() {
    let dir = TempDir::new().unwrap();
    let event = write_file(&dir, "event.json", r#"{"Records": 3}"#);

    let cli = Cli::parse_from(["gdpr-obfuscator", "--event", &event]);
    let config = load_config_or_default(None).unwrap();

    let code = cli
        .args
        .run_with_storage(&config, Arc::new(InMemoryStorage::new()))
        .await
        .unwrap();

    assert_eq!(code, 1);
}
