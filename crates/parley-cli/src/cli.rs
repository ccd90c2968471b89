//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parley CLI - Analyze and de-escalate conflict messages.
#[derive(Debug, Parser)]
#[command(name = "parley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Only the re-expressed message
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a message and produce a de-escalated re-expression
    Bridge(BridgeArgs),

    /// Show the compiled request without calling the remote service
    Prompt(MessageArgs),

    /// List the available conflict domains
    Domains,

    /// Print the response schema sent to the remote service
    Schema,
}

/// Message, domain and slider arguments shared by several commands.
#[derive(Debug, Clone, Default, Args)]
pub struct MessageArgs {
    /// Message to analyze; read from stdin when omitted or "-"
    pub text: Option<String>,

    /// Conflict domain (label or key: international, interpersonal, media, professional)
    #[arg(short, long, env = "PARLEY_DOMAIN")]
    pub domain: Option<String>,

    /// Target emotional intensity (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub intensity: Option<i64>,

    /// Target formality (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub formality: Option<i64>,

    /// Target directness (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub directness: Option<i64>,
}

/// Arguments for the bridge command.
#[derive(Debug, Clone, Args)]
pub struct BridgeArgs {
    #[command(flatten)]
    pub message: MessageArgs,

    /// Abandon the call after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}
