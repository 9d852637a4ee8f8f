//! SNS event envelope.
//!
//! Only the fields the relay reads are modelled; everything else in the
//! Lambda payload is ignored.

use serde::{Deserialize, Serialize};

use crate::error::{NotificationError, Result};

/// SNS event delivered to the Lambda function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEvent {
    /// Delivered records.
    #[serde(default)]
    pub records: Vec<SnsRecord>,
}

/// A single SNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsRecord {
    /// Event source (`aws:sns`).
    #[serde(default)]
    pub event_source: Option<String>,
    /// The SNS message.
    pub sns: SnsMessage,
}

/// SNS message metadata and body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    /// Message identifier.
    #[serde(default)]
    pub message_id: Option<String>,
    /// Topic the message was published to.
    #[serde(default)]
    pub topic_arn: Option<String>,
    /// Message subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
}

impl SnsEvent {
    /// Decodes an event from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::InvalidEvent`] if the JSON does not
    /// describe an SNS event.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            NotificationError::InvalidEvent {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Builds an event carrying a single message body.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            records: vec![SnsRecord {
                event_source: Some(String::from("aws:sns")),
                sns: SnsMessage {
                    message_id: None,
                    topic_arn: None,
                    subject: None,
                    message: message.into(),
                },
            }],
        }
    }

    /// Returns the first record's message.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::EmptyEvent`] if the event has no records.
    pub fn first_message(&self) -> Result<&SnsMessage> {
        self.records
            .first()
            .map(|record| &record.sns)
            .ok_or_else(|| NotificationError::EmptyEvent.into())
    }
}
