//! Single-writer fold of worker results into the report

use crate::classifier::{EmptyKind, FileClassifier};
use crate::models::{AnalysisResult, FileResult};
use tracing::debug;

pub const SECRET_WARNING: &str = "*potential secret key found in codebase";

/// Owns the report while the pipeline runs. Nothing else writes to it.
pub struct Aggregator<'a> {
    classifier: &'a FileClassifier,
    result: AnalysisResult,
    files_seen: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(classifier: &'a FileClassifier, result: AnalysisResult) -> Self {
        Self {
            classifier,
            result,
            files_seen: 0,
        }
    }

    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    /// Fold one file. The result is consumed.
    pub fn add(&mut self, file: FileResult) {
        self.files_seen += 1;
        let path = file.path.display().to_string();

        if file.is_source_file {
            self.result.total_go_files += 1;
            let c = self.classifier.classify(&path, &file.content);

            match c.empty {
                Some(EmptyKind::Source) => self.result.empty_go_files.push(path.clone()),
                Some(EmptyKind::Other) => self.result.empty_other_files.push(path.clone()),
                None => {}
            }
            self.result.total_lines += c.code_lines;
            self.result.comment_lines += c.comment_lines;
            self.result.empty_lines += c.empty_lines;
            self.result.todos.extend(c.todos);
            self.result.frameworks.extend(c.frameworks);
            self.result.secret_keys.extend(c.secrets);
        }

        match std::fs::metadata(&file.path) {
            Ok(meta) => self.result.project_size += meta.len(),
            Err(e) => debug!("Cannot stat {}: {}", path, e),
        }
    }

    /// Close out the fold once the result queue is drained
    pub fn finish(mut self) -> AnalysisResult {
        if !self.result.secret_keys.is_empty() {
            self.result.warnings.push(SECRET_WARNING.to_string());
        }
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn file(path: PathBuf, content: &str) -> FileResult {
        let is_source_file = path.to_string_lossy().ends_with(".go");
        FileResult {
            path,
            content: content.to_string(),
            is_source_file,
        }
    }

    #[test]
    fn test_fold_counts_and_size() {
        let dir = TempDir::new().unwrap();
        let go = dir.path().join("main.go");
        let md = dir.path().join("README.md");
        let go_src = "package main\n\nfunc main() {}";
        let md_src = "# readme\nmore\n";
        std::fs::write(&go, go_src).unwrap();
        std::fs::write(&md, md_src).unwrap();

        let classifier = FileClassifier::new(&AnalyzerConfig::default()).unwrap();
        let mut agg = Aggregator::new(&classifier, AnalysisResult::default());
        agg.add(file(go, go_src));
        agg.add(file(md, md_src));
        assert_eq!(agg.files_seen(), 2);

        let result = agg.finish();
        assert_eq!(result.total_go_files, 1);
        assert_eq!(result.total_lines, 2);
        assert_eq!(result.empty_lines, 1);
        assert_eq!(result.project_size, (go_src.len() + md_src.len()) as u64);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_file_still_classified() {
        let dir = TempDir::new().unwrap();
        let classifier = FileClassifier::new(&AnalyzerConfig::default()).unwrap();
        let mut agg = Aggregator::new(&classifier, AnalysisResult::default());
        agg.add(file(dir.path().join("gone.go"), "package gone"));

        let result = agg.finish();
        assert_eq!(result.total_go_files, 1);
        assert_eq!(result.empty_go_files.len(), 1);
        assert_eq!(result.project_size, 0);
    }

    #[test]
    fn test_secret_warning_added_once() {
        let classifier = FileClassifier::new(&AnalyzerConfig::default()).unwrap();
        let mut agg = Aggregator::new(&classifier, AnalysisResult::default());
        agg.add(file(PathBuf::from("a.go"), "package a\npassword = \"x\"\n"));
        agg.add(file(PathBuf::from("b.go"), "package b\npassword = \"y\"\n"));

        let result = agg.finish();
        assert_eq!(result.secret_keys.len(), 2);
        assert_eq!(result.warnings, vec![SECRET_WARNING.to_string()]);
    }
}
