//! Project-level configuration support
//!
//! Loads per-project configuration from `sgo.toml` in the analysed root.
//!
//! # Configuration Format
//!
//! ```toml
//! # sgo.toml
//!
//! [ignore]
//! patterns = ["testdata", "*.pb.go"]
//! skip_defaults = false
//!
//! [[secrets]]
//! pattern = "(?i)stripe_key\\s*=\\s*\\S+"
//! description = "Stripe Key"
//! category = "API"
//!
//! [scoring]
//! todo_threshold = 20
//! secret_minor_deduction = 0
//!
//! [defaults]
//! output = "json"
//! workers = 4
//! ```

use super::{AnalyzerConfig, ScoringConfig, SecretPattern, DEFAULT_IGNORE_PATTERNS};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const PROJECT_CONFIG_FILE: &str = "sgo.toml";

/// Contents of `sgo.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Extra secret patterns, checked before the built-in table
    #[serde(default)]
    pub secrets: Vec<SecretPattern>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Ignore pattern configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct IgnoreConfig {
    /// Base-name globs to skip in addition to the defaults
    #[serde(default)]
    pub patterns: Vec<String>,

    /// If true, disable the built-in ignore patterns
    #[serde(default)]
    pub skip_defaults: bool,
}

impl IgnoreConfig {
    /// Returns effective ignore patterns (defaults + user patterns).
    /// If `skip_defaults` is true, only user patterns are returned.
    pub fn effective_patterns(&self) -> Vec<String> {
        let mut patterns = Vec::new();

        if !self.skip_defaults {
            patterns.extend(DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()));
        }

        for p in &self.patterns {
            if !patterns.contains(p) {
                patterns.push(p.clone());
            }
        }

        patterns
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub output: Option<String>,

    /// Default worker count
    #[serde(default)]
    pub workers: Option<usize>,
}

impl ProjectConfig {
    /// Fold this project config into an analyzer config.
    ///
    /// Explicit CLI values are applied by the caller afterwards and win.
    pub fn apply(&self, config: &mut AnalyzerConfig) {
        config.ignore_patterns = self.ignore.effective_patterns();

        if !self.secrets.is_empty() {
            let mut patterns = self.secrets.clone();
            patterns.append(&mut config.secret_patterns);
            config.secret_patterns = patterns;
        }

        if let Some(scoring) = &self.scoring {
            config.scoring = scoring.clone();
        }

        if let Some(workers) = self.defaults.workers {
            config.workers = Some(workers);
        }
    }
}

/// Load project configuration from the analysed root.
///
/// A missing file yields the defaults. A file that fails to parse is
/// reported with `warn!` and also yields the defaults.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let toml_path = root.join(PROJECT_CONFIG_FILE);
    if !toml_path.exists() {
        return ProjectConfig::default();
    }

    match load_toml_config(&toml_path) {
        Ok(config) => {
            debug!("Loaded project config from {}", toml_path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", toml_path.display(), e);
            ProjectConfig::default()
        }
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}
