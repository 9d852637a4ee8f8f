//! Rollbar deploy API types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Result, RollbarError};

/// Submitter identity reported to Rollbar.
pub const DEFAULT_LOCAL_USERNAME: &str = "Elastic Beanstalk";

/// Message used when Rollbar flags an error without explaining it.
const UNSPECIFIED_ERROR: &str = "Rollbar rejected the deploy without a message";

/// Form fields posted to the deploy endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DeployMessage {
    /// Rollbar project access token.
    pub access_token: String,
    /// Deployed environment.
    pub environment: String,
    /// Who performed the deploy.
    pub local_username: String,
    /// Deployed revision, possibly `"Unknown"`.
    pub revision: String,
    /// Optional deploy comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DeployMessage {
    /// Creates a deploy message without a comment.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        environment: impl Into<String>,
        local_username: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            environment: environment.into(),
            local_username: local_username.into(),
            revision: revision.into(),
            comment: None,
        }
    }

    /// Sets the deploy comment.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }
}

impl fmt::Debug for DeployMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployMessage")
            .field("access_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("local_username", &self.local_username)
            .field("revision", &self.revision)
            .field("comment", &self.comment)
            .finish()
    }
}

/// Body returned by the deploy endpoint.
///
/// Only `err` decides the outcome. The other fields are informational, so a
/// value of an unexpected shape is read as absent instead of failing the
/// whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployResponse {
    /// Error flag; Rollbar sends `0`/`1` but booleans and strings are honoured.
    #[serde(default)]
    pub err: Value,
    /// Error description.
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    /// Deploy details.
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<DeployData>,
    /// Deploy details, as returned by some API versions.
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<DeployData>,
}

/// Deploy details returned on success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployData {
    /// Identifier of the recorded deploy.
    #[serde(default, deserialize_with = "lenient")]
    pub deploy_id: Option<u64>,
}

/// Reads an optional field, mapping a value of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl DeployResponse {
    /// Returns true if the response flags an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        is_truthy(&self.err)
    }

    /// Returns the identifier of the recorded deploy, if any.
    #[must_use]
    pub fn deploy_id(&self) -> Option<u64> {
        self.data
            .as_ref()
            .or(self.result.as_ref())
            .and_then(|data| data.deploy_id)
    }

    /// Converts an error-flagged response into an error.
    ///
    /// # Errors
    ///
    /// Returns [`RollbarError::Application`] carrying Rollbar's message if the
    /// response flags an error.
    pub fn into_result(self) -> Result<Self> {
        if self.is_error() {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNSPECIFIED_ERROR.to_string());
            return Err(RollbarError::application(message).into());
        }
        Ok(self)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use serde_json::json;

    fn response(body: Value) -> DeployResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_success_response() {
        let parsed = response(json!({"err": 0, "data": {"deploy_id": 8675309}}));

        assert!(!parsed.is_error());
        assert_eq!(parsed.deploy_id(), Some(8_675_309));
        assert!(parsed.into_result().is_ok());
    }

    #[test]
    fn test_error_flag_variants() {
        assert!(response(json!({"err": true})).is_error());
        assert!(response(json!({"err": 1})).is_error());
        assert!(response(json!({"err": "yes"})).is_error());
        assert!(!response(json!({"err": false})).is_error());
        assert!(!response(json!({"err": ""})).is_error());
        assert!(!response(json!({})).is_error());
    }

    #[test]
    fn test_error_response_keeps_message() {
        let result = response(json!({"err": true, "message": "bad token"})).into_result();

        match result {
            Err(RelayError::Rollbar(RollbarError::Application { message })) => {
                assert_eq!(message, "bad token");
            }
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_response_without_message() {
        let err = response(json!({"err": 1})).into_result().unwrap_err();
        assert_eq!(err.to_string(), UNSPECIFIED_ERROR);
    }

    #[test]
    fn test_error_message_survives_odd_data() {
        let parsed: DeployResponse =
            serde_json::from_str(r#"{"err":1,"message":"bad token","data":"n/a"}"#).unwrap();

        assert!(parsed.data.is_none());
        let err = parsed.into_result().unwrap_err();
        assert_eq!(err.to_string(), "bad token");
    }

    #[test]
    fn test_non_numeric_deploy_id_is_ignored() {
        let parsed: DeployResponse =
            serde_json::from_str(r#"{"err":0,"data":{"deploy_id":"12345"}}"#).unwrap();

        assert_eq!(parsed.deploy_id(), None);
        assert!(parsed.into_result().is_ok());
    }

    #[test]
    fn test_non_string_message_falls_back() {
        let err = response(json!({"err": true, "message": {"code": 7}, "result": [1, 2]}))
            .into_result()
            .unwrap_err();

        assert_eq!(err.to_string(), UNSPECIFIED_ERROR);
    }

    #[test]
    fn test_deploy_id_from_result() {
        let parsed = response(json!({"err": 0, "data": null, "result": {"deploy_id": 17}}));
        assert_eq!(parsed.deploy_id(), Some(17));
    }

    #[test]
    fn test_debug_redacts_token() {
        let message = DeployMessage::new("secret-token", "production", DEFAULT_LOCAL_USERNAME, "abc123");
        let debug = format!("{message:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("abc123"));
    }

    #[test]
    fn test_comment_is_omitted_when_absent() {
        let message = DeployMessage::new("token", "production", DEFAULT_LOCAL_USERNAME, "abc123");
        let json = serde_json::to_value(&message).unwrap();

        assert!(json.get("comment").is_none());
        assert_eq!(json["local_username"], "Elastic Beanstalk");
    }
}
