//! Line classification for source files
//!
//! `FileClassifier::classify` is a pure function of `(path, content)`: it
//! never touches the filesystem and never mutates shared state. The
//! aggregator folds its output into the report.

mod rules;

pub use rules::{frameworks_in, SecretRule, SecretRuleSet};

use crate::config::{AnalyzerConfig, FrameworkRule};
use crate::error::AnalyzeResult;
use crate::models::SecretFinding;
use std::collections::BTreeSet;

/// Lines containing this are skipped by framework and secret detection
const STRUCT_MARKER: &str = "struct";

/// Lowercased comment text containing this is reported as a TODO
const TODO_MARKER: &str = "todo:";

/// Which empty-file list a one-line file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// Only a package declaration
    Source,
    Other,
}

/// Everything one file contributes to the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileClassification {
    /// Set for files with at most one line. All counters are then zero.
    pub empty: Option<EmptyKind>,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub empty_lines: usize,
    pub todos: Vec<String>,
    pub frameworks: BTreeSet<String>,
    pub secrets: Vec<SecretFinding>,
}

pub struct FileClassifier {
    secrets: SecretRuleSet,
    frameworks: Vec<FrameworkRule>,
    package_keyword: String,
    comment_marker: String,
}

impl FileClassifier {
    pub fn new(config: &AnalyzerConfig) -> AnalyzeResult<Self> {
        Ok(Self {
            secrets: SecretRuleSet::compile(&config.secret_patterns)?,
            frameworks: config.frameworks.clone(),
            package_keyword: config.package_keyword.clone(),
            comment_marker: config.comment_marker.clone(),
        })
    }

    pub fn classify(&self, path: &str, content: &str) -> FileClassification {
        let mut out = FileClassification::default();

        // Split on '\n' exactly: no newline means one line, a trailing
        // newline adds a final empty line.
        let lines: Vec<&str> = content.split('\n').collect();

        if lines.len() <= 1 {
            let has_package = lines
                .iter()
                .any(|l| l.trim().starts_with(self.package_keyword.as_str()));
            out.empty = Some(if has_package {
                EmptyKind::Source
            } else {
                EmptyKind::Other
            });
            return out;
        }

        for (idx, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            let line_number = idx + 1;

            if line.is_empty() {
                out.empty_lines += 1;
                continue;
            }

            if line.starts_with(self.comment_marker.as_str()) {
                out.comment_lines += 1;
                if line.to_lowercase().contains(TODO_MARKER) {
                    out.todos.push(format!("{path}:{line_number}: {line}"));
                }
                continue;
            }

            out.code_lines += 1;

            if line.contains(STRUCT_MARKER) {
                continue;
            }

            for name in frameworks_in(&self.frameworks, line) {
                out.frameworks.insert(name.to_string());
            }

            if let Some(rule) = self.secrets.first_match(line) {
                out.secrets.push(SecretFinding {
                    file: path.to_string(),
                    line_number,
                    line: line.to_string(),
                    description: rule.description.clone(),
                    category: rule.category.clone(),
                });
            }
        }

        out
    }
}
