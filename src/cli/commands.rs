//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relays Elastic Beanstalk deployment notifications to Rollbar.
#[derive(Parser, Debug)]
#[command(name = "rollbar-deploy-relay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML or JSON configuration file.
    #[arg(short, long, global = true, env = "RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log format; defaults to JSON when serving Lambda events.
    #[arg(long, global = true, env = "RELAY_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute; serves Lambda events when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve SNS events through the Lambda runtime.
    Serve,

    /// Relay a single SNS event read from a file.
    Invoke {
        /// Path to the SNS event JSON.
        event: PathBuf,
    },

    /// Show how a notification message parses.
    Parse {
        /// File holding the message text (reads stdin when omitted).
        file: Option<PathBuf>,

        /// Reject lines without a field separator.
        #[arg(long)]
        strict: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable log lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl Cli {
    /// Returns the command to run, defaulting to [`Commands::Serve`].
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }

    /// Returns the effective log format for the command.
    #[must_use]
    pub fn effective_log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(|| match self.command() {
            Commands::Serve => LogFormat::Json,
            Commands::Invoke { .. } | Commands::Parse { .. } => LogFormat::Text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["rollbar-deploy-relay"]).unwrap();

        assert!(matches!(cli.command(), Commands::Serve));
        assert_eq!(cli.effective_log_format(), LogFormat::Json);
    }

    #[test]
    fn test_invoke_args() {
        let cli = Cli::try_parse_from([
            "rollbar-deploy-relay",
            "--config",
            "relay.yaml",
            "invoke",
            "event.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("relay.yaml")));
        assert!(matches!(cli.command(), Commands::Invoke { ref event } if event == &PathBuf::from("event.json")));
        assert_eq!(cli.effective_log_format(), LogFormat::Text);
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "rollbar-deploy-relay",
            "parse",
            "--strict",
            "--output",
            "json",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.command(), Commands::Parse { file: None, strict: true }));
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.effective_log_format(), LogFormat::Json);
    }
}
