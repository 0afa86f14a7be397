//! CLI definition and handler

mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use sgo::config::{load_project_config, AnalyzerConfig};
use sgo::pipeline::Analyzer;
use sgo::reporters::{report_with_format, OutputFormat};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Parse and validate workers count (1-256)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 256 {
        Err("workers cannot exceed 256".to_string())
    } else {
        Ok(n)
    }
}

/// sgo - Go project analyzer
#[derive(Parser, Debug)]
#[command(name = "sgo")]
#[command(
    version,
    about = "Scan a Go project and score it: line counts, TODOs, empty files, web frameworks and leaked secrets",
    after_help = "\
Examples:
  sgo                          Analyze the current directory
  sgo -p ./service -o json     JSON output for scripting
  SGO_PATH=./service sgo       Path from the environment

Project settings are read from sgo.toml in the analyzed directory."
)]
pub struct Cli {
    /// Path to the project root
    #[arg(long, short = 'p', env = "SGO_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format: text (or txt), json
    #[arg(long, short = 'o', env = "SGO_OUTPUT")]
    pub output: Option<String>,

    /// Number of file-reading workers (default: available CPUs)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

pub fn run(cli: Cli) -> Result<()> {
    let project = load_project_config(&cli.path);
    let mut config = AnalyzerConfig::default();
    project.apply(&mut config);
    if let Some(workers) = cli.workers {
        config.workers = Some(workers);
    }

    // CLI/env beats sgo.toml beats the built-in default
    let format = match cli.output.as_deref().or(project.defaults.output.as_deref()) {
        Some(name) => OutputFormat::from_str(name)?,
        None => OutputFormat::default(),
    };
    debug!("Output format: {}", format);

    let root = cli.path.display();
    let analyzer = Analyzer::new(&cli.path, config)
        .with_context(|| format!("Invalid configuration for {root}"))?;

    let spinner = progress::spinner(!cli.no_progress);
    let tick = |n: usize| spinner.set_position(n as u64);
    let result = analyzer.analyze_with_progress(Some(&tick));
    spinner.finish_and_clear();

    let result = result.with_context(|| format!("Failed to analyze {root}"))?;
    let rendered = report_with_format(&result, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("1000").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sgo"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.no_progress);
        assert!(cli.workers.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let args = [
            "sgo",
            "-p",
            "/tmp/x",
            "-o",
            "json",
            "--workers",
            "3",
            "--no-progress",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp/x"));
        assert_eq!(cli.output.as_deref(), Some("json"));
        assert_eq!(cli.workers, Some(3));
        assert!(cli.no_progress);
    }

    #[test]
    fn test_cli_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["sgo", "--log-level", "loud"]).is_err());
    }
}
