//! Starter CLI - scaffolds a new project from a cached template archive.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = cli::Cli::parse_from(cli::normalize_legacy_args(std::env::args_os()));

    if let Some(shell) = cli.completions {
        commands::completion::execute(shell);
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose, cli.quiet || cli.json);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match commands::scaffold::execute(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing on stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("info,starter=debug,starter_core=debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
