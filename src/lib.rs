//! sgo - Go project analyzer
//!
//! ```no_run
//! use sgo::config::AnalyzerConfig;
//! use sgo::pipeline::Analyzer;
//!
//! let analyzer = Analyzer::new("./my-service", AnalyzerConfig::default())?;
//! let result = analyzer.analyze()?;
//! println!("{} ({})", result.summary.status, result.summary.score);
//! # Ok::<(), sgo::error::AnalyzeError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;

pub use error::{AnalyzeError, AnalyzeResult};
pub use models::{AnalysisResult, SecretFinding, Status, SummaryStatus};
pub use pipeline::Analyzer;
