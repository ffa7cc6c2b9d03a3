//! Greenlight - Slack approval workflow bot
//!
//! Process entry point: load config, build the Slack client, serve the
//! gateway until signalled.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use greenlight::cli::Cli;
use greenlight::config::Config;
use greenlight::gateway;
use slackweb::{HttpSlackClient, SlackApi};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref());

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        debug!(port, "main: overriding gateway port from CLI");
        config.gateway.port = port;
    }

    // Fail fast on missing credentials before binding anything
    config.validate().context("Startup validation failed")?;

    run(&config).await
}

/// Run the gateway until SIGINT/SIGTERM
async fn run(config: &Config) -> Result<()> {
    info!("Greenlight starting...");

    let token = config.slack.bot_token()?;
    let api: Arc<dyn SlackApi> = Arc::new(
        HttpSlackClient::new(
            token,
            &config.slack.base_url,
            Duration::from_millis(config.slack.timeout_ms),
        )
        .context("Failed to build Slack client")?,
    );
    info!(base_url = %config.slack.base_url, "Slack client initialized");

    let listener = gateway::bind(&config.gateway.addr()).await?;
    let gateway_handle = tokio::spawn(gateway::run(listener, api));

    info!("Greenlight running. Press Ctrl+C to stop.");

    // Set up signal handlers
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => {
                warn!("SIGINT received");
            }
            _ = sigterm.recv() => {
                warn!("SIGTERM received");
            }
        }
    }

    #[cfg(not(unix))]
    {
        // On non-Unix, just wait for Ctrl+C
        tokio::signal::ctrl_c().await?;
    }

    info!("Greenlight shutting down...");

    // In-flight handlers are independent, stateless invocations; nothing
    // needs draining beyond stopping the accept loop.
    gateway_handle.abort();

    debug!("run: shutdown complete");
    Ok(())
}
