//! Rollbar deploy API client implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::error::{Result, RollbarError};

use super::notifier::DeployNotifier;
use super::types::{DeployMessage, DeployResponse};

/// Rollbar deploy endpoint.
pub const ROLLBAR_DEPLOY_URL: &str = "https://api.rollbar.com/api/1/deploy/";

/// Longest response body excerpt kept in error messages.
const BODY_EXCERPT_LEN: usize = 200;

/// Rollbar deploy API client.
#[derive(Debug, Clone)]
pub struct RollbarClient {
    /// HTTP client.
    client: Client,
    /// Deploy endpoint URL.
    endpoint: String,
}

impl RollbarClient {
    /// Creates a client posting to `endpoint`.
    ///
    /// Without a `timeout` the HTTP client's defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RollbarError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Returns the deploy endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DeployNotifier for RollbarClient {
    async fn send_deploy(&self, message: &DeployMessage) -> Result<DeployResponse> {
        debug!(
            "Posting deploy of {} to {} at {}",
            message.revision, message.environment, self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(message)
            .send()
            .await
            .map_err(|e| RollbarError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RollbarError::transport(format!("Failed to read response: {e}")))?;
        trace!("Rollbar responded {status}: {body}");

        let parsed: DeployResponse = serde_json::from_str(&body).map_err(|e| {
            RollbarError::InvalidResponse {
                status: status.as_u16(),
                message: format!("{e}: {}", excerpt(&body)),
            }
        })?;

        if let Some(deploy_id) = parsed.deploy_id() {
            info!("Rollbar recorded deploy {deploy_id}");
        }

        Ok(parsed)
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
