//! Inbound notification handling.
//!
//! This module turns the SNS event published by Elastic Beanstalk into a typed
//! [`Notification`]:
//! - Decoding the SNS envelope and picking the message text
//! - Parsing the `Key: Value` lines of the message
//! - Validating the fields a deploy needs

mod event;
mod parser;
mod types;

pub use event::{SnsEvent, SnsMessage, SnsRecord};
pub use parser::{NotificationParser, ParsePolicy, FIELD_SEPARATOR};
pub use types::{DeployTarget, Notification, APPLICATION_FIELD, ENVIRONMENT_FIELD, MESSAGE_FIELD};
