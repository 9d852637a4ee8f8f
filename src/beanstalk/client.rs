//! Elastic Beanstalk revision lookup.

use async_trait::async_trait;
use aws_sdk_elasticbeanstalk::error::DisplayErrorContext;
use aws_sdk_elasticbeanstalk::types::ApplicationVersionDescription;
use aws_sdk_elasticbeanstalk::Client;
use tracing::{debug, error, info};

use crate::error::{LookupError, Result};

use super::source::RevisionSource;

/// Revision reported when an application has no versions.
pub const UNKNOWN_REVISION: &str = "Unknown";

/// Revision source backed by `DescribeApplicationVersions`.
#[derive(Debug, Clone)]
pub struct BeanstalkRevisionSource {
    /// Elastic Beanstalk client.
    client: Client,
}

impl BeanstalkRevisionSource {
    /// Creates a revision source from the standard AWS configuration chain.
    ///
    /// `region` overrides the region found in the environment.
    pub async fn new(region: Option<&str>) -> Self {
        let config = if let Some(region_str) = region {
            aws_config::from_env()
                .region(aws_config::Region::new(region_str.to_string()))
                .load()
                .await
        } else {
            aws_config::load_from_env().await
        };

        Self::with_client(Client::new(&config))
    }

    /// Creates a revision source with an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RevisionSource for BeanstalkRevisionSource {
    async fn latest_revision(&self, application: &str) -> Result<String> {
        debug!("Describing application versions for {application}");

        let output = self
            .client
            .describe_application_versions()
            .application_name(application)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("Failed to describe application versions for {application}: {message}");
                LookupError::describe(application, message)
            })?;

        let versions = output.application_versions();
        debug!("Found {} versions of {application}", versions.len());

        let revision = latest_revision(versions);
        info!("Latest revision of {application}: {revision}");
        Ok(revision)
    }
}

/// Picks the revision from versions ordered most recent first.
///
/// The first version's label wins; no local sorting is applied.
#[must_use]
pub fn latest_revision(versions: &[ApplicationVersionDescription]) -> String {
    versions
        .first()
        .and_then(ApplicationVersionDescription::version_label)
        .unwrap_or(UNKNOWN_REVISION)
        .to_string()
}
