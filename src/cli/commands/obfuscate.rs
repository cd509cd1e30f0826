//! Obfuscate command implementation
//!
//! Masks one CSV source and prints the result or saves it to a file. With
//! `--event` it instead runs the S3 upload event handler over a notification
//! read from a file (or stdin) and prints the handler response.

use crate::adapters::storage::{create_storage, ObjectStorage};
use crate::config::ObfuscatorConfig;
use crate::core::Obfuscator;
use crate::handler::EventHandler;
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Arguments for a masking run
#[derive(Args, Debug)]
pub struct ObfuscateArgs {
    /// JSON request, e.g. '{"file_to_obfuscate": "s3://bucket/data.csv", "pii_fields": ["name"]}'
    #[arg(value_name = "JSON_STRING", required_unless_present = "event")]
    pub json_string: Option<String>,

    /// Write the masked CSV to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "event")]
    pub output: Option<PathBuf>,

    /// Handle the S3 upload event in FILE ("-" for stdin) with the [handler] settings
    #[arg(long, value_name = "FILE", conflicts_with = "json_string")]
    pub event: Option<PathBuf>,
}

impl ObfuscateArgs {
    /// Execute the run against the configured storage backend
    pub async fn execute(&self, config: &ObfuscatorConfig) -> anyhow::Result<i32> {
        let storage = create_storage(&config.storage);
        tracing::debug!(backend = storage.backend_name(), "Storage backend ready");

        self.run_with_storage(config, storage).await
    }

    /// Execute the run against an explicit storage backend
    pub async fn run_with_storage(
        &self,
        config: &ObfuscatorConfig,
        storage: Arc<dyn ObjectStorage>,
    ) -> anyhow::Result<i32> {
        match (&self.event, &self.json_string) {
            (Some(path), _) => handle_event(path, config, storage).await,
            (None, Some(payload)) => self.obfuscate(payload, storage).await,
            (None, None) => anyhow::bail!("a JSON_STRING or --event FILE is required"),
        }
    }

    async fn obfuscate(&self, payload: &str, storage: Arc<dyn ObjectStorage>) -> anyhow::Result<i32> {
        let result = Obfuscator::new(storage).obfuscate(payload).await?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, result.as_str())
                    .await
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                println!("Obfuscated file saved to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.as_str().as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(0)
    }
}

async fn handle_event(
    path: &Path,
    config: &ObfuscatorConfig,
    storage: Arc<dyn ObjectStorage>,
) -> anyhow::Result<i32> {
    let raw = read_event(path).await?;

    let response = EventHandler::new(storage, config.handler.clone())
        .handle_json(&raw)
        .await;
    println!("{}", serde_json::to_string(&response)?);

    if response.is_success() {
        return Ok(0);
    }

    let message =
        serde_json::from_str::<String>(&response.body).unwrap_or_else(|_| response.body.clone());
    eprintln!("{message}");
    Ok(1)
}

async fn read_event(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read event from stdin")?;
        return Ok(raw);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read event file '{}'", path.display()))
}
