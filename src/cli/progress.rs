//! Progress spinner shown while a scan runs

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::IndexedRandom;
use std::time::Duration;

pub const PROGRESS_MESSAGES: &[&str] = &[
    "Investigating your codebase...",
    "Scanning your codebase...",
    "Analyzing your code...",
    "Uncovering your secrets...",
    "Predicting your code's future...",
    "Casting analysis spells...",
    "Calculating code metrics...",
    "Uncovering plot twists in your code...",
    "Messing with your code files...",
];

pub fn random_message() -> &'static str {
    PROGRESS_MESSAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Scanning your codebase...")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg} {pos} files")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Spinner on stderr. Hidden when disabled or when stderr is not a terminal.
pub fn spinner(enabled: bool) -> ProgressBar {
    if !enabled || !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(random_message());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
