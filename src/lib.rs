// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Rollbar Deploy Relay
//!
//! Relays Elastic Beanstalk deployment notifications to the Rollbar deploy API.
//!
//! ## Overview
//!
//! Elastic Beanstalk publishes environment events to an SNS topic. This crate
//! runs as the Lambda function subscribed to that topic and, for each event:
//!
//! 1. **Parse**: reads the `Key: Value` lines of the SNS message
//! 2. **Lookup**: asks Elastic Beanstalk for the application's latest version label
//! 3. **Notify**: posts a deploy for the environment and revision to Rollbar
//!
//! Each step is awaited in turn and the first failure fails the invocation.
//!
//! ## Modules
//!
//! - [`notification`]: SNS envelope and message parsing
//! - [`beanstalk`]: Revision lookup
//! - [`rollbar`]: Rollbar deploy API client
//! - [`relay`]: Orchestration of one invocation
//! - [`config`]: Configuration loading and validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! A notification such as
//!
//! ```text
//! Message: New application version was deployed to running EC2 instances.
//! Environment: production
//! Application: myapp
//! ```
//!
//! is reported to Rollbar as a deploy of the latest `myapp` version label to
//! the `production` environment.

// ============================================================================
// Modules
// ============================================================================

pub mod beanstalk;
pub mod cli;
pub mod config;
pub mod error;
pub mod notification;
pub mod relay;
pub mod rollbar;

// ============================================================================
// Re-exports
// ============================================================================

pub use beanstalk::{BeanstalkRevisionSource, RevisionSource, UNKNOWN_REVISION};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigLoader, ConfigValidator, RelayConfig};
pub use error::{RelayError, Result};
pub use notification::{DeployTarget, Notification, NotificationParser, ParsePolicy, SnsEvent};
pub use relay::{DeployOutcome, DeployRelay};
pub use rollbar::{DeployMessage, DeployNotifier, DeployResponse, RollbarClient};
