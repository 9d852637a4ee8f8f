//! Configuration loader.
//!
//! This module assembles the relay configuration from an optional file, a
//! `.env` file and environment variables. Environment variables win over the
//! file.

use crate::error::{ConfigError, Result};
use crate::notification::ParsePolicy;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::RelayConfig;
use super::validator::ConfigValidator;

/// Rollbar access token.
pub const ENV_ACCESS_TOKEN: &str = "ROLLBAR_ACCESS_TOKEN";

/// Rollbar deploy endpoint override.
pub const ENV_DEPLOY_URL: &str = "ROLLBAR_DEPLOY_URL";

/// Submitter identity override.
pub const ENV_LOCAL_USERNAME: &str = "RELAY_LOCAL_USERNAME";

/// AWS region override for Elastic Beanstalk.
pub const ENV_REGION: &str = "RELAY_AWS_REGION";

/// Rollbar HTTP timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "RELAY_TIMEOUT_SECS";

/// Reject malformed notification lines instead of skipping them.
pub const ENV_STRICT_PARSING: &str = "RELAY_STRICT_PARSING";

/// Send the notification message as the deploy comment.
pub const ENV_INCLUDE_COMMENT: &str = "RELAY_INCLUDE_COMMENT";

/// Loader for the relay configuration.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Directory searched for the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the directory searched for the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads, overrides and validates the configuration.
    ///
    /// Without a `config_path` the defaults are used as the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// override is invalid, or validation fails.
    pub fn load(&self, config_path: Option<&Path>) -> Result<RelayConfig> {
        self.load_dotenv()?;

        let mut config = match config_path {
            Some(path) => self.load_file(path)?,
            None => {
                debug!("No configuration file given, starting from defaults");
                RelayConfig::default()
            }
        };

        Self::apply_overrides(&mut config, |name| std::env::var(name).ok())?;

        let report = ConfigValidator::new().validate(&config)?;
        debug!(
            "Configuration valid with {} warnings: {config:?}",
            report.warnings.len()
        );

        Ok(config)
    }

    /// Loads configuration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RelayConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        Self::parse_str(&content, Some(path))
    }

    /// Parses configuration from a YAML or JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is invalid.
    pub fn parse_str(content: &str, source: Option<&Path>) -> Result<RelayConfig> {
        debug!("Parsing relay configuration");

        serde_yaml::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
            .into()
        })
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean override cannot be parsed.
    pub fn apply_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            debug!("Overriding rollbar_access_token from environment");
            config.rollbar_access_token = token;
        }

        if let Some(endpoint) = lookup(ENV_DEPLOY_URL) {
            debug!("Overriding rollbar_endpoint from environment");
            config.rollbar_endpoint = endpoint;
        }

        if let Some(username) = lookup(ENV_LOCAL_USERNAME) {
            debug!("Overriding local_username from environment");
            config.local_username = username;
        }

        if let Some(region) = lookup(ENV_REGION) {
            debug!("Overriding region from environment");
            config.region = Some(region);
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            debug!("Overriding timeout_secs from environment");
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(ENV_TIMEOUT_SECS, e.to_string()))?;
            config.timeout_secs = Some(secs);
        }

        if let Some(strict) = lookup(ENV_STRICT_PARSING) {
            debug!("Overriding parse_policy from environment");
            config.parse_policy = if parse_flag(ENV_STRICT_PARSING, &strict)? {
                ParsePolicy::Strict
            } else {
                ParsePolicy::Lenient
            };
        }

        if let Some(include) = lookup(ENV_INCLUDE_COMMENT) {
            debug!("Overriding include_comment from environment");
            config.include_comment = parse_flag(ENV_INCLUDE_COMMENT, &include)?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: Some(env_path.display().to_string()),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::invalid(name, format!("'{other}' is not a boolean")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_legacy_secret_json() {
        let config = ConfigLoader::parse_str(r#"{"rollbar_access_token": "abc"}"#, None).unwrap();

        assert_eq!(config.rollbar_access_token, "abc");
        assert_eq!(config.local_username, "Elastic Beanstalk");
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r"
rollbar_access_token: abc
rollbar_endpoint: https://rollbar.internal/api/1/deploy/
local_username: CI
region: eu-west-1
timeout_secs: 20
parse_policy: strict
include_comment: true
";
        let config = ConfigLoader::parse_str(yaml, None).unwrap();

        assert_eq!(config.rollbar_endpoint, "https://rollbar.internal/api/1/deploy/");
        assert_eq!(config.local_username, "CI");
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
        assert!(config.include_comment);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = ConfigLoader::parse_str("timeout_secs: [not, a, number]", None);

        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = ConfigLoader::parse_str("rollbar_access_token: from-file", None).unwrap();
        let vars = env(&[
            (ENV_ACCESS_TOKEN, "from-env"),
            (ENV_LOCAL_USERNAME, "Deployer"),
            (ENV_REGION, "us-east-1"),
            (ENV_TIMEOUT_SECS, " 10 "),
            (ENV_STRICT_PARSING, "TRUE"),
            (ENV_INCLUDE_COMMENT, "yes"),
        ]);

        ConfigLoader::apply_overrides(&mut config, |name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.rollbar_access_token, "from-env");
        assert_eq!(config.local_username, "Deployer");
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
        assert!(config.include_comment);
    }

    #[test]
    fn test_invalid_overrides() {
        let vars = env(&[(ENV_TIMEOUT_SECS, "soon")]);
        let mut config = RelayConfig::default();
        assert!(ConfigLoader::apply_overrides(&mut config, |name| vars.get(name).cloned()).is_err());

        let vars = env(&[(ENV_STRICT_PARSING, "maybe")]);
        let result = ConfigLoader::apply_overrides(&mut config, |name| vars.get(name).cloned());
        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::InvalidValue { ref field, .. }))
                if field == ENV_STRICT_PARSING
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "rollbar_access_token: from-file").unwrap();

        let config = ConfigLoader::new().load_file(file.path()).unwrap();
        assert_eq!(config.rollbar_access_token, "from-file");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::new().load_file("/nonexistent/relay.yaml");

        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_load_dotenv_without_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        assert!(ConfigLoader::new().with_base_path(dir.path()).load_dotenv().is_ok());
    }
}
