//! Configuration module for sgo
//!
//! This module handles:
//! - The built-in ignore, secret and framework tables
//! - Scoring thresholds and deductions
//! - Project-level overrides (sgo.toml)
//!
//! Everything here is a plain value. The analyzer receives an
//! `AnalyzerConfig` at construction and never reads global state.

mod project_config;

pub use project_config::{
    load_project_config, CliDefaults, IgnoreConfig, ProjectConfig, PROJECT_CONFIG_FILE,
};

use serde::{Deserialize, Serialize};

/// Names (not paths) skipped during traversal. Matching directories are pruned.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    "vendor",
    ".vscode",
    "node_modules",
    "*.exe",
    "*.test",
    "*.out",
];

/// Built-in secret table, evaluated top to bottom. First match wins, so
/// specific patterns must come before the general ones.
#[rustfmt::skip]
const DEFAULT_SECRET_PATTERNS: &[(&str, &str, &str)] = &[
    // API keys and tokens
    (r#"(?i)(api[_-]?key|apikey)["']?\s*[:=]\s*["']?[a-zA-Z0-9]{32,}"#, "API Key", "API"),
    (r#"(?i)(jwt[_-]?token|jwt)["']?\s*[:=]\s*["']?[a-zA-Z0-9_=-]+\.[a-zA-Z0-9_=-]+\.?[a-zA-Z0-9_.+/=-]*"#, "JWT Token", "Token"),
    (r#"(?i)(access[_-]?token|access_token)["']?\s*[:=]\s*["']?[a-zA-Z0-9]{32,}"#, "Access Token", "Token"),
    (r#"(?i)(refresh[_-]?token|refresh_token)["']?\s*[:=]\s*["']?[a-zA-Z0-9]{32,}"#, "Refresh Token", "Token"),
    // Certificates and keys
    (r"(?i)-----BEGIN\s+(?:RSA\s+)?PRIVATE\s+KEY-----", "Private Key", "Certificate"),
    (r"(?i)-----BEGIN\s+CERTIFICATE-----", "Certificate", "Certificate"),
    (r"(?i)\.(pem|key|crt|cer|der|p12|pfx)$", "Certificate File", "Certificate"),
    // Database credentials
    (r#"(?i)(db[_-]?(?:password|pass|pwd))["']?\s*[:=]\s*["']?[^"'\s]+"#, "Database Password", "Database"),
    (r#"(?i)(mongodb[_-]?uri|mongo[_-]?uri)["']?\s*[:=]\s*["']?mongodb(\+srv)?://[^"'\s]+"#, "MongoDB URI", "Database"),
    (r#"(?i)(postgres[_-]?uri|pg[_-]?uri)["']?\s*[:=]\s*["']?postgres(ql)?://[^"'\s]+"#, "PostgreSQL URI", "Database"),
    // Cloud credentials
    (r#"(?i)(aws[_-]?(?:access[_-]?key|secret[_-]?key|secret))["']?\s*[:=]\s*["']?[A-Z0-9]{20,}"#, "AWS Credentials", "Cloud"),
    (r#"(?i)(gcp[_-]?(?:key|credentials|secret))["']?\s*[:=]\s*["']?[A-Za-z0-9+/]{32,}"#, "GCP Credentials", "Cloud"),
    (r#"(?i)(azure[_-]?(?:key|secret|connection[_-]?string))["']?\s*[:=]\s*["']?[A-Za-z0-9+/]{32,}"#, "Azure Credentials", "Cloud"),
    // General secrets
    (r#"(?i)(password|passwd|pwd)["']?\s*[:=]\s*["']?[^"'\s]+"#, "Password", "General"),
    (r#"(?i)(secret[_-]?key|secret)["']?\s*[:=]\s*["']?[a-zA-Z0-9]{32,}"#, "Secret Key", "General"),
    (r#"(?i)(auth[_-]?token|auth_token)["']?\s*[:=]\s*["']?[a-zA-Z0-9]{32,}"#, "Auth Token", "General"),
];

/// Substring -> framework name
const DEFAULT_FRAMEWORKS: &[(&str, &str)] = &[
    ("gin.", "gin"),
    ("echo.", "echo"),
    ("fiber.", "fiber"),
];

/// One entry of the secret table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPattern {
    /// Regular expression (Rust `regex` syntax)
    pub pattern: String,
    pub description: String,
    pub category: String,
}

impl SecretPattern {
    pub fn new(pattern: &str, description: &str, category: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            description: description.to_string(),
            category: category.to_string(),
        }
    }

    pub fn defaults() -> Vec<SecretPattern> {
        DEFAULT_SECRET_PATTERNS
            .iter()
            .map(|(pattern, description, category)| {
                Self::new(pattern, description, category)
            })
            .collect()
    }
}

/// A code-line substring that marks use of a web framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkRule {
    pub needle: String,
    pub name: String,
}

impl FrameworkRule {
    pub fn defaults() -> Vec<FrameworkRule> {
        DEFAULT_FRAMEWORKS
            .iter()
            .map(|(needle, name)| FrameworkRule {
                needle: needle.to_string(),
                name: name.to_string(),
            })
            .collect()
    }
}

/// Everything the analyzer needs for one run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Glob patterns matched against file and directory base names
    pub ignore_patterns: Vec<String>,
    pub secret_patterns: Vec<SecretPattern>,
    pub frameworks: Vec<FrameworkRule>,
    /// File-name suffix of files that get line classification
    pub source_extension: String,
    /// Prefix that makes a one-line source file an "empty go file"
    pub package_keyword: String,
    pub comment_marker: String,
    /// Manifest file name, looked up in the project root only
    pub manifest_name: String,
    /// Worker threads (None = available parallelism)
    pub workers: Option<usize>,
    /// Capacity of the path queue and of the result queue
    pub queue_capacity: usize,
    pub scoring: ScoringConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            secret_patterns: SecretPattern::defaults(),
            frameworks: FrameworkRule::defaults(),
            source_extension: ".go".to_string(),
            package_keyword: "package ".to_string(),
            comment_marker: "//".to_string(),
            manifest_name: "go.mod".to_string(),
            workers: None,
            queue_capacity: 100,
            scoring: ScoringConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Resolved worker count, never below 1
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}

/// Score deductions and status thresholds
///
/// A threshold is exceeded when the metric is strictly greater than it.
/// Below the threshold, any non-zero metric takes the minor deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i64,

    /// Bytes
    pub large_project_threshold: u64,
    pub large_project_deduction: i64,

    pub todo_threshold: u64,
    pub todo_deduction: i64,
    pub todo_minor_deduction: i64,

    pub secret_threshold: u64,
    pub secret_deduction: i64,
    pub secret_minor_deduction: i64,

    pub empty_file_threshold: u64,
    pub empty_file_deduction: i64,
    pub empty_file_minor_deduction: i64,

    pub warning_threshold: u64,
    pub warning_deduction: i64,
    pub warning_minor_deduction: i64,

    /// Lowest score that is still PERFECT
    pub perfect_threshold: i64,
    /// Lowest score that is still NEED REVIEW
    pub need_review_threshold: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            large_project_threshold: 100 * 1024 * 1024,
            large_project_deduction: 5,
            todo_threshold: 15,
            todo_deduction: 15,
            todo_minor_deduction: 5,
            secret_threshold: 5,
            secret_deduction: 20,
            secret_minor_deduction: 10,
            empty_file_threshold: 5,
            empty_file_deduction: 10,
            empty_file_minor_deduction: 5,
            warning_threshold: 5,
            warning_deduction: 15,
            warning_minor_deduction: 5,
            perfect_threshold: 90,
            need_review_threshold: 70,
        }
    }
}
