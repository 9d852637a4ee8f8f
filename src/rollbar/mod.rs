//! Rollbar deploy API integration module.
//!
//! This module builds deploy messages and submits them to the Rollbar deploy
//! endpoint.

mod client;
mod notifier;
mod types;

pub use client::{RollbarClient, ROLLBAR_DEPLOY_URL};
pub use notifier::DeployNotifier;
pub use types::{DeployData, DeployMessage, DeployResponse, DEFAULT_LOCAL_USERNAME};

#[cfg(test)]
pub use notifier::MockDeployNotifier;
