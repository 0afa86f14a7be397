//! Text reporter
//!
//! Fixed section order, one item per line. Empty sections print `None`.

use crate::models::{AnalysisResult, SecretFinding};
use anyhow::Result;
use std::fmt::Write;
use std::time::Duration;

const NONE: &str = "None";
const RULE: &str = "--------------------------------";

/// Human-readable byte count, 1024 based: `512 B`, `1.5 KB`, `3.0 MB`
pub fn format_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    if size < UNIT {
        return format!("{size} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", size as f64 / div as f64, suffix)
}

fn list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if lines.is_empty() {
        NONE.to_string()
    } else {
        lines.join("\n")
    }
}

fn secret_entry(f: &SecretFinding) -> String {
    format!(
        "[{}] {}\n  {}\n  {}: {}",
        f.category, f.description, f.file, f.line_number, f.line
    )
}

/// Render result as a plain-text report
pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();
    let summary = &result.summary;

    writeln!(out, "Project Analysis Results:")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Status: {} (Score: {})", summary.status, summary.score)?;
    writeln!(out, "Notes:\n{}\n", list(&summary.notes))?;

    let duration = Duration::from_nanos(result.scan_duration);
    writeln!(out, "Scan Duration: {duration:?}")?;
    writeln!(out, "Go Version: {}", result.go_version)?;
    writeln!(out, "Total Go Files: {}", result.total_go_files)?;
    writeln!(out, "Total Lines: {}", result.total_lines)?;
    writeln!(out, "Comment Lines: {}", result.comment_lines)?;
    writeln!(out, "Empty Lines: {}", result.empty_lines)?;
    writeln!(out, "Project Size: {}\n", format_size(result.project_size))?;

    let sections = [
        ("Frameworks Used", list(&result.frameworks)),
        ("TODOs Found", list(&result.todos)),
        ("Empty Go Files", list(&result.empty_go_files)),
        ("Empty Other Files", list(&result.empty_other_files)),
        (
            "Potential Secret Keys",
            list(result.secret_keys.iter().map(secret_entry)),
        ),
        (
            "Packages Used",
            list(result.packages.iter().map(|(p, v)| format!("{p}: {v}"))),
        ),
        ("Warnings", list(&result.warnings)),
    ];

    let last = sections.len() - 1;
    for (i, (title, body)) in sections.iter().enumerate() {
        writeln!(out, "{title}:\n{body}")?;
        if i != last {
            writeln!(out)?;
        }
    }

    Ok(out)
}
