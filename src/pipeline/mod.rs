//! Analysis pipeline
//!
//! ```text
//!   walker ──paths──▶ [bounded] ──▶ worker × N ──results──▶ [bounded] ──▶ aggregator
//! ```
//!
//! - One walker thread feeds the path queue and drops its sender when done
//! - Every worker owns a clone of the result sender, so the result queue
//!   closes exactly when the last worker exits
//! - The aggregator runs on the calling thread and is the only writer of
//!   the report
//! - All threads are joined before scoring

mod aggregator;
mod walker;
mod workers;

pub use aggregator::{Aggregator, SECRET_WARNING};
pub use walker::{check_root, walk, IgnoreMatcher};
pub use workers::{is_source_file, read_file, run_worker};

use crate::classifier::FileClassifier;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, AnalyzeResult};
use crate::manifest::read_manifest;
use crate::models::{AnalysisResult, FileResult};
use crate::scoring::summarize;
use crossbeam_channel::bounded;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Called on the aggregator thread with the running file count
pub type ProgressFn<'a> = &'a dyn Fn(usize);

/// One configured analysis of one project root
pub struct Analyzer {
    root: PathBuf,
    config: Arc<AnalyzerConfig>,
    matcher: Arc<IgnoreMatcher>,
    classifier: FileClassifier,
}

impl Analyzer {
    /// Compile the configured patterns. Invalid patterns fail here, before
    /// any file is touched.
    pub fn new(root: impl Into<PathBuf>, config: AnalyzerConfig) -> AnalyzeResult<Self> {
        let matcher = IgnoreMatcher::new(&config.ignore_patterns)?;
        let classifier = FileClassifier::new(&config)?;
        Ok(Self {
            root: root.into(),
            config: Arc::new(config),
            matcher: Arc::new(matcher),
            classifier,
        })
    }

    pub fn analyze(&self) -> AnalyzeResult<AnalysisResult> {
        self.analyze_with_progress(None)
    }

    /// Run the whole analysis and score it
    pub fn analyze_with_progress(
        &self,
        progress: Option<ProgressFn<'_>>,
    ) -> AnalyzeResult<AnalysisResult> {
        let started = Instant::now();
        check_root(&self.root)?;

        let mut result = AnalysisResult::new(self.config.ignore_patterns.clone());
        self.read_manifest_into(&mut result)?;

        let num_workers = self.config.worker_count();
        let capacity = self.config.queue_capacity.max(1);
        info!(
            "Analyzing {}: workers={}, queue={}",
            self.root.display(),
            num_workers,
            capacity
        );

        let (path_tx, path_rx) = bounded::<PathBuf>(capacity);
        let (result_tx, result_rx) = bounded::<FileResult>(capacity);

        // Walker thread: feed paths
        let walker = {
            let root = self.root.clone();
            let matcher = Arc::clone(&self.matcher);
            thread::spawn(move || walk(&root, matcher, path_tx))
        };

        // Worker threads: read in parallel
        let mut workers = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let rx = path_rx.clone();
            let tx = result_tx.clone();
            let config = Arc::clone(&self.config);
            workers.push(thread::spawn(move || {
                run_worker(rx, tx, &config.source_extension)
            }));
        }

        // Drop our copies of channels so receivers can detect completion
        drop(path_rx);
        drop(result_tx);

        // Consumer: fold sequentially
        let mut aggregator = Aggregator::new(&self.classifier, result);
        for file in result_rx {
            aggregator.add(file);
            if let Some(cb) = progress {
                cb(aggregator.files_seen());
            }
        }

        let walked = walker
            .join()
            .map_err(|_| AnalyzeError::WorkerPanicked("walker"))?;
        for w in workers {
            w.join().map_err(|_| AnalyzeError::WorkerPanicked("worker"))?;
        }
        debug!(
            "Walked {} paths, aggregated {} files",
            walked,
            aggregator.files_seen()
        );

        let mut result = aggregator.finish();
        let elapsed = started.elapsed().as_nanos();
        result.scan_duration = u64::try_from(elapsed).unwrap_or(u64::MAX);
        result.summary = summarize(&result, &self.config.scoring);

        info!(
            "Analysis complete: {} files, score {} ({})",
            result.total_go_files, result.summary.score, result.summary.status
        );
        Ok(result)
    }

    fn read_manifest_into(&self, result: &mut AnalysisResult) -> AnalyzeResult<()> {
        let manifest_path = self.root.join(&self.config.manifest_name);
        match read_manifest(&manifest_path)? {
            Some(manifest) => {
                result.module_path = manifest.module_path;
                result.go_version = manifest.go_version;
                result.packages = manifest.requires;
            }
            None => {
                result
                    .warnings
                    .push(format!("*{} file not found", self.config.manifest_name));
            }
        }
        Ok(())
    }
}
