//! Parley CLI - bridge conflict messages from the command line.

use clap::Parser;
use parley_cli::commands;
use parley_cli::{AppConfig, Cli, CliError, Command, Formatter};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        // Flag checks and the caller deadline fail outside the orchestrator
        if let CliError::Bridge(inner) = &e {
            error!(kind = %inner.kind(), error = %inner, "bridge command failed");
        }
        eprintln!("Error: {}", e.display_message());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> parley_cli::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Bridge(args) => commands::execute_bridge(args, &config, &formatter).await?,
        Command::Prompt(args) => commands::execute_prompt(args, &config, &formatter)?,
        Command::Domains => commands::execute_domains(&formatter)?,
        Command::Schema => commands::execute_schema(&formatter)?,
    }

    Ok(())
}
