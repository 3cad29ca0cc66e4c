// Tally - Cross-store Activity Report Pipeline
// Copyright (c) 2025 Tally Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use tally::cli::commands::generate::GenerateArgs;
use tally::cli::{Cli, Commands};
use tally::config::LoggingConfig;
use tally::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config (file logging is
    // configured per deployment, not for ad-hoc CLI runs)
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Tally - cross-store activity report generator"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command; no subcommand runs the default report
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Generate(args)) => args.execute(&cli.config).await,
        Some(Commands::ValidateConfig(args)) => args.execute(&cli.config).await,
        Some(Commands::Init(args)) => args.execute().await,
        None => GenerateArgs::default().execute(&cli.config).await,
    }
}
