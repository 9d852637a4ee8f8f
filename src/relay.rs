//! Deploy relay orchestration.
//!
//! One invocation runs strictly in order: parse the notification, look up the
//! revision of the named application, then post the deploy to Rollbar. The
//! first failure ends the invocation and nothing is sent after it.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::beanstalk::RevisionSource;
use crate::config::RelayConfig;
use crate::error::Result;
use crate::notification::{Notification, NotificationParser, SnsEvent};
use crate::rollbar::{DeployMessage, DeployNotifier};

/// Relays deployment notifications to Rollbar.
pub struct DeployRelay<R: RevisionSource, N: DeployNotifier> {
    /// Rollbar access token.
    access_token: String,
    /// Submitter identity.
    local_username: String,
    /// Whether the notification message becomes the deploy comment.
    include_comment: bool,
    /// Notification parser.
    parser: NotificationParser,
    /// Revision lookup.
    revisions: R,
    /// Deploy destination.
    notifier: N,
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    /// Application the deploy was reported for.
    pub application: String,
    /// Environment the deploy was reported for.
    pub environment: String,
    /// Reported revision.
    pub revision: String,
    /// Identifier Rollbar assigned to the deploy.
    pub deploy_id: Option<u64>,
}

impl fmt::Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully sent deploy to Rollbar. Environment: {} Revision: {}",
            self.environment, self.revision
        )
    }
}

impl<R: RevisionSource, N: DeployNotifier> DeployRelay<R, N> {
    /// Creates a relay from a validated configuration.
    #[must_use]
    pub fn new(config: &RelayConfig, revisions: R, notifier: N) -> Self {
        Self {
            access_token: config.rollbar_access_token.clone(),
            local_username: config.local_username.clone(),
            include_comment: config.include_comment,
            parser: NotificationParser::with_policy(config.parse_policy),
            revisions,
            notifier,
        }
    }

    /// Handles an SNS event.
    ///
    /// Only the first record is relayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event has no records or relaying its message
    /// fails.
    pub async fn handle_event(&self, event: &SnsEvent) -> Result<DeployOutcome> {
        let message = event.first_message()?;

        if event.records.len() > 1 {
            warn!(
                "Event carries {} records, relaying only the first",
                event.records.len()
            );
        }
        if let Some(subject) = &message.subject {
            debug!("Relaying notification: {subject}");
        }

        self.handle_message(&message.message).await
    }

    /// Handles a notification message body.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be parsed or lacks a deploy
    /// target, the revision lookup fails, the deploy cannot be sent, or
    /// Rollbar rejects it.
    pub async fn handle_message(&self, message: &str) -> Result<DeployOutcome> {
        let notification = self.parser.parse(message)?;
        let target = notification.deploy_target()?;
        info!(
            "Deploy notification for {} in {}",
            target.application, target.environment
        );

        let revision = self.revisions.latest_revision(&target.application).await?;

        let deploy = DeployMessage::new(
            self.access_token.as_str(),
            target.environment.as_str(),
            self.local_username.as_str(),
            revision,
        )
        .with_comment(self.comment(&notification));

        let response = self.notifier.send_deploy(&deploy).await?.into_result()?;

        let outcome = DeployOutcome {
            application: target.application,
            environment: deploy.environment,
            revision: deploy.revision,
            deploy_id: response.deploy_id(),
        };
        info!("{outcome}");
        Ok(outcome)
    }

    fn comment(&self, notification: &Notification) -> Option<String> {
        if self.include_comment {
            notification.message().map(str::to_string)
        } else {
            None
        }
    }
}
