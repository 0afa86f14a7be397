//! Directory traversal with base-name ignore patterns

use crate::error::{AnalyzeError, AnalyzeResult};
use crossbeam_channel::Sender;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Compiled ignore patterns, matched against a single path component
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> AnalyzeResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| AnalyzeError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| AnalyzeError::InvalidIgnorePattern {
                pattern: patterns.join(", "),
                source,
            })?;
        Ok(Self { set })
    }

    pub fn is_ignored(&self, name: &OsStr) -> bool {
        self.set.is_match(Path::new(name))
    }
}

/// Fail early when the root cannot be listed
pub fn check_root(root: &Path) -> AnalyzeResult<()> {
    std::fs::read_dir(root)
        .map(|_| ())
        .map_err(|source| AnalyzeError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })
}

/// Send every non-directory entry under `root` that survives the ignore
/// patterns. Returns the number of paths sent.
///
/// Ignored directories are pruned, so nothing below them is visited. The
/// root itself is never matched. Unreadable subdirectories are logged and
/// skipped.
pub fn walk(root: &Path, matcher: Arc<IgnoreMatcher>, tx: Sender<PathBuf>) -> usize {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    builder.filter_entry(move |entry| {
        entry.depth() == 0 || !matcher.is_ignored(entry.file_name())
    });

    let mut sent = 0;
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }

        if tx.send(entry.into_path()).is_err() {
            debug!("Path queue closed, stopping walk");
            break;
        }
        sent += 1;
    }
    sent
}
