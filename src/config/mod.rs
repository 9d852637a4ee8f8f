//! Configuration module for the deploy relay.
//!
//! This module handles all configuration-related functionality:
//! - Deserializing the optional configuration file
//! - Loading `.env` files and environment overrides
//! - Validation of configuration values

mod parser;
mod spec;
mod validator;

pub use parser::{
    ConfigLoader, ENV_ACCESS_TOKEN, ENV_DEPLOY_URL, ENV_INCLUDE_COMMENT, ENV_LOCAL_USERNAME,
    ENV_REGION, ENV_STRICT_PARSING, ENV_TIMEOUT_SECS,
};
pub use spec::RelayConfig;
pub use validator::{ConfigValidator, ValidationReport};
