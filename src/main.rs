use clap::Parser;
use colored::*;
use orthogroups::cli::{Cli, Commands};
use orthogroups::core::config::{default_config, load_config, Config};
use orthogroups::OrthoError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with ORTHOGROUPS_LOG environment variable support
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("ORTHOGROUPS_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<OrthoError>() {
            Some(OrthoError::Config(_)) => 2,
            Some(OrthoError::Input { .. })
            | Some(OrthoError::Output { .. })
            | Some(OrthoError::Io(_)) => 3,
            Some(OrthoError::Parse { .. }) => 4,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    orthogroups::utils::parallel::configure_thread_pool(cli.threads)?;

    let config: Config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    match cli.command {
        Commands::Filter(args) => orthogroups::cli::commands::filter::run(args, &config),
        Commands::Stats(args) => orthogroups::cli::commands::stats::run(args, &config),
    }
}
