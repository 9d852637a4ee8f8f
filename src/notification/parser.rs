//! Parser for the `Key: Value` text carried by deployment notifications.
//!
//! Elastic Beanstalk notifications look like:
//!
//! ```text
//! Timestamp: Wed Jun 10 09:12:31 UTC 2026
//! Message: New application version was deployed to running EC2 instances.
//!
//! Environment: production
//! Application: myapp
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::{NotificationError, Result};

use super::types::Notification;

/// Separator between a field name and its value.
pub const FIELD_SEPARATOR: &str = ": ";

/// How lines without a field separator are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Skip the line.
    #[default]
    Lenient,
    /// Reject the whole message.
    Strict,
}

/// Parser for notification message bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationParser {
    /// Malformed line policy.
    policy: ParsePolicy,
}

impl NotificationParser {
    /// Creates a lenient parser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: ParsePolicy::Lenient,
        }
    }

    /// Creates a parser with the given malformed line policy.
    #[must_use]
    pub const fn with_policy(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    /// Returns the malformed line policy.
    #[must_use]
    pub const fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Parses a message body into a notification.
    ///
    /// Lines are split on the first `": "`. Values are trimmed, keys are kept
    /// as written, and a later line overwrites an earlier one with the same key.
    /// Blank lines and lines with an empty key are always skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::MalformedLine`] under [`ParsePolicy::Strict`]
    /// when a non-blank line has no separator.
    pub fn parse(&self, message: &str) -> Result<Notification> {
        let mut fields = BTreeMap::new();

        for (index, line) in message.split('\n').enumerate() {
            match line.split_once(FIELD_SEPARATOR) {
                Some((key, value)) if !key.is_empty() => {
                    fields.insert(key.to_string(), value.trim().to_string());
                }
                Some(_) => trace!("Skipping line {} with empty key", index + 1),
                None if line.trim().is_empty() => {}
                None => match self.policy {
                    ParsePolicy::Lenient => {
                        debug!("Skipping line {} without field separator", index + 1);
                    }
                    ParsePolicy::Strict => {
                        return Err(NotificationError::MalformedLine {
                            line_number: index + 1,
                            line: line.to_string(),
                        }
                        .into());
                    }
                },
            }
        }

        debug!("Parsed {} notification fields", fields.len());
        Ok(Notification::from_fields(fields))
    }
}
