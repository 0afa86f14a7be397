//! Core data models for sgo
//!
//! `AnalysisResult` is the report handed to the renderers. Its serialized
//! field names and order are what downstream tooling reads, so keep them
//! stable.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Status bucket derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[serde(rename = "PERFECT")]
    #[default]
    Perfect,
    #[serde(rename = "NEED REVIEW")]
    NeedReview,
    #[serde(rename = "BAD")]
    Bad,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Perfect => write!(f, "PERFECT"),
            Status::NeedReview => write!(f, "NEED REVIEW"),
            Status::Bad => write!(f, "BAD"),
        }
    }
}

/// Final verdict on a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SummaryStatus {
    pub status: Status,
    pub score: i64,
    pub notes: Vec<String>,
}

/// A line that looks like a hardcoded credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretFinding {
    pub file: String,
    /// 1-based
    pub line_number: usize,
    /// Trimmed line text
    pub line: String,
    pub description: String,
    pub category: String,
}

/// Raw file content produced by a worker, consumed once by the aggregator
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub content: String,
    pub is_source_file: bool,
}

/// The shared report. Only the aggregator writes to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Wall-clock analysis time in nanoseconds
    pub scan_duration: u64,
    pub go_version: String,
    #[serde(default)]
    pub module_path: String,
    pub frameworks: BTreeSet<String>,
    pub secret_keys: Vec<SecretFinding>,
    pub todos: Vec<String>,
    pub empty_go_files: Vec<String>,
    pub empty_other_files: Vec<String>,
    /// Code lines only: blank and comment lines are counted separately
    pub total_lines: usize,
    pub comment_lines: usize,
    pub empty_lines: usize,
    /// Dependency path -> version
    pub packages: BTreeMap<String, String>,
    /// Bytes
    pub project_size: u64,
    pub total_go_files: usize,
    pub warnings: Vec<String>,
    pub ignored_patterns: Vec<String>,
    pub summary: SummaryStatus,
}

impl AnalysisResult {
    /// Empty report for a run using the given ignore patterns
    pub fn new(ignored_patterns: Vec<String>) -> Self {
        Self {
            ignored_patterns,
            ..Default::default()
        }
    }

    pub fn empty_file_count(&self) -> usize {
        self.empty_go_files.len() + self.empty_other_files.len()
    }
}
