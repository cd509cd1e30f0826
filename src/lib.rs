// GDPR Obfuscator - PII field masking for CSV files
// Copyright (c) 2025 GDPR Obfuscator Contributors
// Licensed under the MIT License

//! # GDPR Obfuscator
//!
//! Replaces the values of named personally identifiable fields in CSV files
//! with `***`, leaving every other value, the header and the row order
//! untouched. Sources are local files or objects in Amazon S3.
//!
//! ## Overview
//!
//! A request is a JSON document:
//!
//! ```json
//! {
//!     "file_to_obfuscate": "s3://my_ingestion_bucket/new_data/file1.csv",
//!     "pii_fields": ["name", "email_address"]
//! }
//! ```
//!
//! The library:
//! - **Resolves** the request into a validated source and a field list
//! - **Masks** the named columns of every data row
//! - **Returns** the masked CSV as text, bytes or a readable cursor
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Request resolution and field masking
//! - [`handler`] - S3 upload event handler
//! - [`adapters`] - Object storage (S3, in-memory)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdpr_obfuscator::adapters::storage::create_storage;
//! use gdpr_obfuscator::config::load_config_or_default;
//! use gdpr_obfuscator::core::Obfuscator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!     let obfuscator = Obfuscator::new(create_storage(&config.storage));
//!
//!     let result = obfuscator
//!         .obfuscate(r#"{"file_to_obfuscate": "data/customers.csv", "pii_fields": ["email"]}"#)
//!         .await?;
//!
//!     println!("Masked {} cells in {} rows", result.masked_cells(), result.row_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Event Handling
//!
//! ```rust,no_run
//! use gdpr_obfuscator::adapters::storage::create_storage;
//! use gdpr_obfuscator::config::ObfuscatorConfig;
//! use gdpr_obfuscator::handler::EventHandler;
//!
//! # async fn example(raw_event: &str) {
//! let config = ObfuscatorConfig::default();
//! let handler = EventHandler::new(create_storage(&config.storage), config.handler.clone());
//!
//! let response = handler.handle_json(raw_event).await;
//! println!("{} {}", response.status_code, response.body);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::ObfuscatorError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod handler;
pub mod logging;
