//! Configuration types for the deploy relay.
//!
//! The configuration file is YAML; since JSON is valid YAML, a legacy
//! `secret.json` holding only `rollbar_access_token` is accepted unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::notification::ParsePolicy;
use crate::rollbar::{DEFAULT_LOCAL_USERNAME, ROLLBAR_DEPLOY_URL};

/// Relay configuration, loaded once at startup.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    /// Rollbar project access token with `post_server_item` scope.
    #[serde(default)]
    pub rollbar_access_token: String,
    /// Rollbar deploy endpoint.
    #[serde(default = "default_endpoint")]
    pub rollbar_endpoint: String,
    /// Submitter identity reported with each deploy.
    #[serde(default = "default_local_username")]
    pub local_username: String,
    /// AWS region override for Elastic Beanstalk.
    #[serde(default)]
    pub region: Option<String>,
    /// HTTP timeout for the Rollbar call, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Treatment of notification lines without a field separator.
    #[serde(default)]
    pub parse_policy: ParsePolicy,
    /// Send the notification's `Message` field as the deploy comment.
    #[serde(default)]
    pub include_comment: bool,
}

fn default_endpoint() -> String {
    ROLLBAR_DEPLOY_URL.to_string()
}

fn default_local_username() -> String {
    DEFAULT_LOCAL_USERNAME.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            rollbar_access_token: String::new(),
            rollbar_endpoint: default_endpoint(),
            local_username: default_local_username(),
            region: None,
            timeout_secs: None,
            parse_policy: ParsePolicy::default(),
            include_comment: false,
        }
    }
}

impl RelayConfig {
    /// Creates a configuration with defaults and the given access token.
    #[must_use]
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            rollbar_access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Returns the Rollbar HTTP timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("rollbar_access_token", &"<redacted>")
            .field("rollbar_endpoint", &self.rollbar_endpoint)
            .field("local_username", &self.local_username)
            .field("region", &self.region)
            .field("timeout_secs", &self.timeout_secs)
            .field("parse_policy", &self.parse_policy)
            .field("include_comment", &self.include_comment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();

        assert_eq!(config.rollbar_endpoint, "https://api.rollbar.com/api/1/deploy/");
        assert_eq!(config.local_username, "Elastic Beanstalk");
        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
        assert!(config.timeout().is_none());
        assert!(!config.include_comment);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RelayConfig::with_access_token("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_timeout() {
        let config = RelayConfig {
            timeout_secs: Some(15),
            ..RelayConfig::default()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }
}
