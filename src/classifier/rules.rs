//! Compiled rule tables
//!
//! Patterns arrive as plain strings in `AnalyzerConfig`. They are compiled
//! once per run and shared read-only between threads.

use crate::config::{FrameworkRule, SecretPattern};
use crate::error::{AnalyzeError, AnalyzeResult};
use regex::Regex;

/// A secret pattern with its regex compiled
#[derive(Debug, Clone)]
pub struct SecretRule {
    pub regex: Regex,
    pub description: String,
    pub category: String,
}

/// Ordered secret rules. The first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct SecretRuleSet {
    rules: Vec<SecretRule>,
}

impl SecretRuleSet {
    pub fn compile(patterns: &[SecretPattern]) -> AnalyzeResult<Self> {
        let rules = patterns
            .iter()
            .map(|p| {
                let regex = Regex::new(&p.pattern).map_err(|source| {
                    AnalyzeError::InvalidSecretPattern {
                        pattern: p.pattern.clone(),
                        source,
                    }
                })?;
                Ok(SecretRule {
                    regex,
                    description: p.description.clone(),
                    category: p.category.clone(),
                })
            })
            .collect::<AnalyzeResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn first_match(&self, line: &str) -> Option<&SecretRule> {
        self.rules.iter().find(|r| r.regex.is_match(line))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Names of every framework whose needle occurs in `line`
pub fn frameworks_in<'a>(
    rules: &'a [FrameworkRule],
    line: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    rules
        .iter()
        .filter(move |r| line.contains(r.needle.as_str()))
        .map(|r| r.name.as_str())
}
