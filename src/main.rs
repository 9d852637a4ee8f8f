//! Deploy relay entrypoint.
//!
//! Without a subcommand the binary serves SNS events through the Lambda
//! runtime; the other commands exercise the relay from a terminal.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use rollbar_deploy_relay::cli::{Cli, Commands, LogFormat, OutputFormatter};
use rollbar_deploy_relay::config::ConfigLoader;
use rollbar_deploy_relay::error::{RelayError, Result};
use rollbar_deploy_relay::notification::{NotificationParser, ParsePolicy, SnsEvent};
use rollbar_deploy_relay::{BeanstalkRevisionSource, DeployRelay, RollbarClient};

use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Relay wired to the real services.
type Relay = DeployRelay<BeanstalkRevisionSource, RollbarClient>;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.effective_log_format());

    let formatter = OutputFormatter::new(cli.output);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli, &formatter)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", formatter.format_failure(&e));
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr so command output on stdout stays parseable.
fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().with_ansi(false).init(),
        LogFormat::Text => builder.init(),
    }
}

/// Main async entry point.
async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command() {
        Commands::Serve => cmd_serve(config_path).await,
        Commands::Invoke { event } => cmd_invoke(config_path, &event, formatter).await,
        Commands::Parse { file, strict } => cmd_parse(file.as_deref(), strict, formatter),
    }
}

/// Serve SNS events from the Lambda runtime.
async fn cmd_serve(config_path: Option<&Path>) -> Result<()> {
    let relay = Arc::new(build_relay(config_path).await?);
    info!("Waiting for SNS events");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEvent>| {
        let relay = Arc::clone(&relay);
        async move { handle_lambda_event(&relay, event).await }
    }))
    .await
    .map_err(|e| RelayError::internal(format!("Lambda runtime failed: {e}")))
}

/// Handles one Lambda invocation.
async fn handle_lambda_event(
    relay: &Relay,
    event: LambdaEvent<SnsEvent>,
) -> std::result::Result<String, lambda_runtime::Error> {
    let (event, context) = event.into_parts();
    debug!("Handling request {}", context.request_id);

    match relay.handle_event(&event).await {
        Ok(outcome) => Ok(outcome.to_string()),
        Err(e) => {
            error!("Request {} failed: {e}", context.request_id);
            Err(e.into())
        }
    }
}

/// Relay a single event file.
async fn cmd_invoke(
    config_path: Option<&Path>,
    event_path: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    info!("Invoking relay with event: {}", event_path.display());

    let content = std::fs::read_to_string(event_path)?;
    let event = SnsEvent::from_json(&content)?;

    let relay = build_relay(config_path).await?;
    let outcome = relay.handle_event(&event).await?;

    println!("{}", formatter.format_outcome(&outcome));
    Ok(())
}

/// Show how a message parses.
///
/// Accepts raw message text or a whole SNS event.
fn cmd_parse(file: Option<&Path>, strict: bool, formatter: &OutputFormatter) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let message = match SnsEvent::from_json(&content) {
        Ok(event) => event.first_message()?.message.clone(),
        Err(_) => content,
    };

    let policy = if strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };
    let notification = NotificationParser::with_policy(policy).parse(&message)?;

    println!("{}", formatter.format_notification(&notification));
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads configuration and wires the relay to AWS and Rollbar.
async fn build_relay(config_path: Option<&Path>) -> Result<Relay> {
    let base_path = config_path
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));

    let config = ConfigLoader::new().with_base_path(base_path).load(config_path)?;

    let revisions = BeanstalkRevisionSource::new(config.region.as_deref()).await;
    let notifier = RollbarClient::new(&config.rollbar_endpoint, config.timeout())?;
    info!("Relaying deploys to {}", notifier.endpoint());

    Ok(DeployRelay::new(&config, revisions, notifier))
}
