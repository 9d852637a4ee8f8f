//! Typed view over a parsed notification.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{NotificationError, Result};

/// Field naming the Elastic Beanstalk application.
pub const APPLICATION_FIELD: &str = "Application";

/// Field naming the Elastic Beanstalk environment.
pub const ENVIRONMENT_FIELD: &str = "Environment";

/// Free-text description of the event.
pub const MESSAGE_FIELD: &str = "Message";

/// Fields parsed from a notification message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notification {
    /// Field values keyed by field name.
    fields: BTreeMap<String, String>,
}

/// Application and environment a deploy is reported for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    /// Elastic Beanstalk application name.
    pub application: String,
    /// Elastic Beanstalk environment name.
    pub environment: String,
}

impl Notification {
    /// Creates a notification from already parsed fields.
    #[must_use]
    pub const fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns the application name, if present and non-empty.
    #[must_use]
    pub fn application(&self) -> Option<&str> {
        self.non_empty(APPLICATION_FIELD)
    }

    /// Returns the environment name, if present and non-empty.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.non_empty(ENVIRONMENT_FIELD)
    }

    /// Returns the event description, if present and non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.non_empty(MESSAGE_FIELD)
    }

    /// Returns all parsed fields.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Returns the number of parsed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extracts the deploy target.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::MissingField`] if the application or the
    /// environment is absent or empty.
    pub fn deploy_target(&self) -> Result<DeployTarget> {
        let application = self
            .application()
            .ok_or_else(|| NotificationError::missing(APPLICATION_FIELD))?;
        let environment = self
            .environment()
            .ok_or_else(|| NotificationError::missing(ENVIRONMENT_FIELD))?;

        Ok(DeployTarget {
            application: application.to_string(),
            environment: environment.to_string(),
        })
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;

    fn notification(pairs: &[(&str, &str)]) -> Notification {
        Notification::from_fields(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_deploy_target() {
        let target = notification(&[("Application", "myapp"), ("Environment", "production")])
            .deploy_target()
            .unwrap();

        assert_eq!(target.application, "myapp");
        assert_eq!(target.environment, "production");
    }

    #[test]
    fn test_deploy_target_requires_application() {
        let result = notification(&[("Environment", "production")]).deploy_target();

        assert!(matches!(
            result,
            Err(RelayError::Notification(NotificationError::MissingField { ref field }))
                if field == APPLICATION_FIELD
        ));
    }

    #[test]
    fn test_empty_environment_counts_as_missing() {
        let result = notification(&[("Application", "myapp"), ("Environment", "")]).deploy_target();

        assert!(matches!(
            result,
            Err(RelayError::Notification(NotificationError::MissingField { ref field }))
                if field == ENVIRONMENT_FIELD
        ));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let json = serde_json::to_string(&notification(&[("Application", "myapp")])).unwrap();
        assert_eq!(json, r#"{"Application":"myapp"}"#);
    }
}
