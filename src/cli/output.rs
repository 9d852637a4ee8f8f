//! Output formatting for CLI commands.

use colored::Colorize;
use tabled::{Table, Tabled};

use crate::error::RelayError;
use crate::notification::Notification;
use crate::relay::DeployOutcome;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Notification field row for table display.
#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats parsed notification fields.
    #[must_use]
    pub fn format_notification(&self, notification: &Notification) -> String {
        match self.format {
            OutputFormat::Json => to_json(notification),
            OutputFormat::Text => {
                if notification.is_empty() {
                    return "No fields found.".yellow().to_string();
                }

                let rows = notification.fields().iter().map(|(field, value)| FieldRow {
                    field: field.clone(),
                    value: value.clone(),
                });
                let mut output = Table::new(rows).to_string();

                match notification.deploy_target() {
                    Ok(target) => output.push_str(&format!(
                        "\n{} {} in {}",
                        "Deploy target:".green(),
                        target.application.bold(),
                        target.environment.bold()
                    )),
                    Err(e) => output.push_str(&format!("\n{} {e}", "Not relayable:".red())),
                }

                output
            }
        }
    }

    /// Formats a successful invocation.
    #[must_use]
    pub fn format_outcome(&self, outcome: &DeployOutcome) -> String {
        match self.format {
            OutputFormat::Json => to_json(outcome),
            OutputFormat::Text => {
                let mut output = format!("{} {outcome}", "✓".green().bold());
                if let Some(deploy_id) = outcome.deploy_id {
                    output.push_str(&format!(" (deploy {deploy_id})"));
                }
                output
            }
        }
    }

    /// Formats a failed invocation.
    #[must_use]
    pub fn format_failure(&self, error: &RelayError) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
            OutputFormat::Text => format!("{} {error}", "✗".red().bold()),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
