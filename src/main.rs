// GDPR Obfuscator - PII field masking for CSV files
// Copyright (c) 2025 GDPR Obfuscator Contributors
// Licensed under the MIT License

use clap::Parser;
use gdpr_obfuscator::cli::Cli;
use gdpr_obfuscator::config::load_config_or_default;
use gdpr_obfuscator::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "GDPR Obfuscator");

    let exit_code = match cli.args.execute(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Obfuscation failed");
            eprintln!("Error: {e}");
            1
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}
