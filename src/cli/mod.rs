//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the obfuscator using clap.

pub mod commands;

use clap::Parser;

/// GDPR obfuscator - mask personally identifiable fields in CSV files
#[derive(Parser, Debug)]
#[command(name = "gdpr-obfuscator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to obfuscator.toml when present)
    #[arg(short, long, env = "OBFUSCATOR_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "OBFUSCATOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub args: commands::obfuscate::ObfuscateArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PAYLOAD: &str = r#"{"file_to_obfuscate": "s3://bucket/a.csv"}"#;

    #[test]
    fn test_cli_parse_payload() {
        let cli = Cli::parse_from(["gdpr-obfuscator", PAYLOAD]);
        assert_eq!(cli.args.json_string.as_deref(), Some(PAYLOAD));
        assert!(cli.args.output.is_none());
        assert!(cli.args.event.is_none());
    }

    #[test]
    fn test_cli_parse_with_output() {
        let cli = Cli::parse_from(["gdpr-obfuscator", "-o", "masked.csv", PAYLOAD]);
        assert_eq!(cli.args.output, Some(PathBuf::from("masked.csv")));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["gdpr-obfuscator", "--config", "custom.toml", PAYLOAD]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["gdpr-obfuscator", "--log-level", "debug", PAYLOAD]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_requires_payload() {
        assert!(Cli::try_parse_from(["gdpr-obfuscator"]).is_err());
    }

    #[test]
    fn test_cli_parse_event() {
        let cli = Cli::parse_from(["gdpr-obfuscator", "--event", "event.json"]);
        assert_eq!(cli.args.event, Some(PathBuf::from("event.json")));
        assert!(cli.args.json_string.is_none());
    }

    #[test]
    fn test_cli_event_conflicts_with_payload_and_output() {
        assert!(Cli::try_parse_from(["gdpr-obfuscator", "--event", "e.json", PAYLOAD]).is_err());
        assert!(
            Cli::try_parse_from(["gdpr-obfuscator", "--event", "e.json", "-o", "out.csv"]).is_err()
        );
    }
}
