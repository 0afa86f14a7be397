//! JSON reporter
//!
//! Outputs the full AnalysisResult as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::AnalysisResult;
use anyhow::Result;

/// Render result as JSON
pub fn render(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
