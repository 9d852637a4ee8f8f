//! CLI module for the deploy relay.
//!
//! This module provides the command-line interface used to serve Lambda
//! events and to exercise the relay locally.

mod commands;
mod output;

pub use commands::{Cli, Commands, LogFormat, OutputFormat};
pub use output::OutputFormatter;
