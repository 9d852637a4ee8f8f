//! Configuration validation.
//!
//! The relay refuses to start with a configuration that could never produce
//! a successful deploy notice.

use reqwest::Url;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::parser::ENV_ACCESS_TOKEN;
use super::spec::RelayConfig;

/// Validator for relay configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Outcome of a successful validation.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Non-fatal issues.
    pub warnings: Vec<String>,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a relay configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is missing, the endpoint is not an
    /// http(s) URL, the local username is empty or the timeout is zero.
    pub fn validate(&self, config: &RelayConfig) -> Result<ValidationReport> {
        debug!("Validating relay configuration");
        let mut report = ValidationReport::default();

        if config.rollbar_access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken {
                env_var: ENV_ACCESS_TOKEN.to_string(),
            }
            .into());
        }

        let endpoint = Url::parse(&config.rollbar_endpoint)
            .map_err(|e| ConfigError::invalid("rollbar_endpoint", e.to_string()))?;
        match endpoint.scheme() {
            "https" => {}
            "http" => {
                let warning = format!("Rollbar endpoint {endpoint} is not using TLS");
                warn!("{warning}");
                report.warnings.push(warning);
            }
            other => {
                return Err(ConfigError::invalid(
                    "rollbar_endpoint",
                    format!("unsupported scheme '{other}'"),
                )
                .into());
            }
        }

        if config.local_username.trim().is_empty() {
            return Err(ConfigError::invalid("local_username", "must not be empty").into());
        }

        if config.timeout_secs == Some(0) {
            return Err(ConfigError::invalid("timeout_secs", "must be greater than zero").into());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;

    #[test]
    fn test_valid_config() {
        let config = RelayConfig::with_access_token("token");
        let report = ConfigValidator::new().validate(&config).unwrap();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_token() {
        let config = RelayConfig::with_access_token("   ");
        let result = ConfigValidator::new().validate(&config);

        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::MissingAccessToken { .. }))
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = RelayConfig {
            rollbar_endpoint: String::from("not a url"),
            ..RelayConfig::with_access_token("token")
        };

        assert!(matches!(
            ConfigValidator::new().validate(&config),
            Err(RelayError::Config(ConfigError::InvalidValue { ref field, .. }))
                if field == "rollbar_endpoint"
        ));
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = RelayConfig {
            rollbar_endpoint: String::from("ftp://api.rollbar.com/api/1/deploy/"),
            ..RelayConfig::with_access_token("token")
        };
        assert!(ConfigValidator::new().validate(&config).is_err());
    }

    #[test]
    fn test_plain_http_warns() {
        let config = RelayConfig {
            rollbar_endpoint: String::from("http://localhost:8080/api/1/deploy/"),
            ..RelayConfig::with_access_token("token")
        };
        let report = ConfigValidator::new().validate(&config).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_zero_timeout() {
        let config = RelayConfig {
            timeout_secs: Some(0),
            ..RelayConfig::with_access_token("token")
        };
        assert!(ConfigValidator::new().validate(&config).is_err());
    }

    #[test]
    fn test_empty_local_username() {
        let config = RelayConfig {
            local_username: String::new(),
            ..RelayConfig::with_access_token("token")
        };
        assert!(ConfigValidator::new().validate(&config).is_err());
    }
}
