//! Revision source trait definition.

use async_trait::async_trait;

use crate::error::Result;

/// Source of the currently deployed revision of an application.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Returns the version label of the application's most recent version.
    ///
    /// Returns [`UNKNOWN_REVISION`](super::UNKNOWN_REVISION) if the
    /// application has no versions.
    async fn latest_revision(&self, application: &str) -> Result<String>;
}
