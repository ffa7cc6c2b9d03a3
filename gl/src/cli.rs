//! CLI definitions

use clap::Parser;
use std::path::PathBuf;

/// Greenlight - Slack approval workflow bot
#[derive(Debug, Parser)]
#[command(name = "greenlight", about = "Slack approval-request workflow bot", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Gateway listen port, overriding the config file
    #[arg(short, long, help = "Gateway listen port (overrides config)")]
    pub port: Option<u16>,
}
