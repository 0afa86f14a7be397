//! Project Health Scoring
//!
//! Turns the aggregated metrics into a score, a status bucket and a list
//! of human-readable notes.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = max(0, 100 - Σ deductions)
//!
//! For each rule, in order:
//!   value > threshold  → deduction,       high note
//!   value > 0          → minor deduction, minor note
//! ```
//!
//! # Rules (default values)
//!
//! - **Project size**: > 100 MiB → -5 (no minor branch)
//! - **TODOs**: > 15 → -15, otherwise -5
//! - **Secret findings**: > 5 → -20, otherwise -10
//! - **Empty files** (source + other): > 5 → -10, otherwise -5
//! - **Warnings**: > 5 → -15, otherwise -5
//!
//! Status: score >= 90 is PERFECT, score >= 70 is NEED REVIEW, anything
//! lower is BAD. Every number above comes from `ScoringConfig`.

use crate::config::ScoringConfig;
use crate::models::{AnalysisResult, Status, SummaryStatus};
use tracing::debug;

const MIB: u64 = 1024 * 1024;

/// One deduction rule
#[derive(Clone, Copy)]
pub struct ScoreRule {
    pub name: &'static str,
    pub metric: fn(&AnalysisResult) -> u64,
    /// Strictly greater than this takes the high branch
    pub threshold: u64,
    pub deduction: i64,
    /// Called with the metric value and the threshold
    pub high_note: fn(u64, u64) -> String,
    /// Applies to any non-zero value at or below the threshold
    pub minor: Option<MinorBranch>,
}

#[derive(Clone, Copy)]
pub struct MinorBranch {
    pub deduction: i64,
    pub note: fn(u64) -> String,
}

impl ScoreRule {
    /// Deduction and note for `value`, if the rule fires
    pub fn evaluate(&self, value: u64) -> Option<(i64, String)> {
        if value > self.threshold {
            let note = (self.high_note)(value, self.threshold);
            return Some((self.deduction, note));
        }
        match self.minor {
            Some(minor) if value > 0 => Some((minor.deduction, (minor.note)(value))),
            _ => None,
        }
    }
}

fn count(n: usize) -> u64 {
    n as u64
}

/// Whole MiB thresholds print as `MB`, anything else in bytes
fn size_note(threshold: u64) -> String {
    if threshold > 0 && threshold % MIB == 0 {
        format!("Large project size (> {}MB)", threshold / MIB)
    } else {
        format!("Large project size (> {threshold} bytes)")
    }
}

/// The rule table, in evaluation order
pub fn rules(config: &ScoringConfig) -> Vec<ScoreRule> {
    vec![
        ScoreRule {
            name: "project_size",
            metric: |r| r.project_size,
            threshold: config.large_project_threshold,
            deduction: config.large_project_deduction,
            high_note: |_, threshold| size_note(threshold),
            minor: None,
        },
        ScoreRule {
            name: "todos",
            metric: |r| count(r.todos.len()),
            threshold: config.todo_threshold,
            deduction: config.todo_deduction,
            high_note: |n, _| format!("High number of unresolved TODOs ({n})"),
            minor: Some(MinorBranch {
                deduction: config.todo_minor_deduction,
                note: |n| format!("Has {n} TODO(s)"),
            }),
        },
        ScoreRule {
            name: "secret_keys",
            metric: |r| count(r.secret_keys.len()),
            threshold: config.secret_threshold,
            deduction: config.secret_deduction,
            high_note: |n, _| format!("Multiple potential secret keys found ({n})"),
            minor: Some(MinorBranch {
                deduction: config.secret_minor_deduction,
                note: |n| format!("Potential secret key found ({n})"),
            }),
        },
        ScoreRule {
            name: "empty_files",
            metric: |r| count(r.empty_file_count()),
            threshold: config.empty_file_threshold,
            deduction: config.empty_file_deduction,
            high_note: |n, _| format!("Multiple empty files found ({n})"),
            minor: Some(MinorBranch {
                deduction: config.empty_file_minor_deduction,
                note: |n| format!("Empty files found ({n})"),
            }),
        },
        ScoreRule {
            name: "warnings",
            metric: |r| count(r.warnings.len()),
            threshold: config.warning_threshold,
            deduction: config.warning_deduction,
            high_note: |n, _| format!("Multiple warnings found ({n})"),
            minor: Some(MinorBranch {
                deduction: config.warning_minor_deduction,
                note: |n| format!("Warnings found ({n})"),
            }),
        },
    ]
}

pub fn status_for(score: i64, config: &ScoringConfig) -> Status {
    if score >= config.perfect_threshold {
        Status::Perfect
    } else if score >= config.need_review_threshold {
        Status::NeedReview
    } else {
        Status::Bad
    }
}

/// Score a fully aggregated result
pub fn summarize(result: &AnalysisResult, config: &ScoringConfig) -> SummaryStatus {
    let mut score = config.base_score;
    let mut notes = Vec::new();

    for rule in rules(config) {
        let value = (rule.metric)(result);
        if let Some((deduction, note)) = rule.evaluate(value) {
            debug!("{}: {} -> -{} ({})", rule.name, value, deduction, note);
            score -= deduction;
            notes.push(note);
        }
    }

    let score = score.max(0);
    SummaryStatus {
        status: status_for(score, config),
        score,
        notes,
    }
}
