//! sgo - Go project analyzer CLI
//!
//! Walks a Go project, counts code/comment/blank lines, collects TODOs,
//! empty files, web frameworks and likely hardcoded secrets, then scores
//! the result.

mod cli;

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging (stderr, so JSON on stdout stays clean)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
