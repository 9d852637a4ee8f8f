//! Deploy notifier trait definition.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{DeployMessage, DeployResponse};

/// Destination for deploy messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeployNotifier: Send + Sync {
    /// Submits a deploy message and returns the parsed response.
    ///
    /// A response flagging an error is still returned as `Ok`; callers decide
    /// with [`DeployResponse::into_result`].
    async fn send_deploy(&self, message: &DeployMessage) -> Result<DeployResponse>;
}
