//! Error types for the deploy relay.
//!
//! Every step of an invocation (configuration, notification parsing, the
//! Elastic Beanstalk revision lookup and the Rollbar deploy call) has its own
//! error enum, all folded into [`RelayError`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the deploy relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification parsing errors.
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Elastic Beanstalk revision lookup errors.
    #[error("Revision lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Rollbar deploy API errors.
    ///
    /// Displayed without a prefix so that a rejection reported by Rollbar
    /// reaches the caller as Rollbar's own message.
    #[error(transparent)]
    Rollbar(#[from] RollbarError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// No Rollbar access token was configured.
    #[error("Missing Rollbar access token (set {env_var} or rollbar_access_token)")]
    MissingAccessToken {
        /// Environment variable that can provide the token.
        env_var: String,
    },

    /// A configuration value is invalid.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Field or variable holding the invalid value.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Errors raised while turning an inbound event into a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// A non-blank line carried no `Key: Value` separator.
    #[error("Malformed notification line {line_number}: {line:?}")]
    MalformedLine {
        /// 1-based line number within the message.
        line_number: usize,
        /// The offending line.
        line: String,
    },

    /// A field required to build the deploy is absent or empty.
    #[error("Notification is missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// The inbound event carried no SNS records.
    #[error("Event contains no SNS records")]
    EmptyEvent,

    /// The inbound event could not be decoded.
    #[error("Invalid event: {message}")]
    InvalidEvent {
        /// Description of the decoding failure.
        message: String,
    },
}

/// Elastic Beanstalk lookup errors.
#[derive(Debug, Error)]
pub enum LookupError {
    /// `DescribeApplicationVersions` failed.
    #[error("Failed to describe application versions for {application}: {message}")]
    DescribeFailed {
        /// Application that was queried.
        application: String,
        /// Description of the failure.
        message: String,
    },
}

/// Rollbar deploy API errors.
#[derive(Debug, Error)]
pub enum RollbarError {
    /// The request never produced a response.
    #[error("Failed to send deploy to Rollbar: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// Rollbar answered and flagged the deploy as an error.
    #[error("{message}")]
    Application {
        /// Message returned by Rollbar.
        message: String,
    },

    /// Rollbar answered with a body that is not the expected JSON.
    #[error("Invalid response from Rollbar (status {status}): {message}")]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
        /// Description of the response issue.
        message: String,
    },
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates an invalid value error for a specific field.
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl NotificationError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl LookupError {
    /// Creates a describe failure for an application.
    #[must_use]
    pub fn describe(application: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DescribeFailed {
            application: application.into(),
            message: message.into(),
        }
    }
}

impl RollbarError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an application error from Rollbar's message.
    #[must_use]
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }
}
