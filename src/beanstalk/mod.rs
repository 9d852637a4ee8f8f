//! Elastic Beanstalk integration module.
//!
//! This module resolves the revision that was just deployed to an
//! application by reading its most recent application version.

mod client;
mod source;

pub use client::{latest_revision, BeanstalkRevisionSource, UNKNOWN_REVISION};
pub use source::RevisionSource;

#[cfg(test)]
pub use source::MockRevisionSource;
