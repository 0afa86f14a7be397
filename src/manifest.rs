//! go.mod reader
//!
//! Understands the subset of the module file grammar the report needs:
//! `module`, `go` and `require` (single-line and block form). The other
//! directives are accepted and skipped so real-world files parse.

use crate::error::{AnalyzeError, AnalyzeResult};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Directives that are valid but carry nothing we report
const SKIPPED_DIRECTIVES: &[&str] = &[
    "toolchain",
    "godebug",
    "replace",
    "exclude",
    "retract",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub module_path: String,
    pub go_version: String,
    /// Dependency path -> version
    pub requires: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Require,
    Skipped,
}

/// Read the manifest at `path`. `Ok(None)` when the file does not exist.
pub fn read_manifest(path: &Path) -> AnalyzeResult<Option<Manifest>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(AnalyzeError::ManifestUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let manifest = parse_manifest(path, &content)?;
    debug!(
        "Parsed {}: module={} go={} requires={}",
        path.display(),
        manifest.module_path,
        manifest.go_version,
        manifest.requires.len()
    );
    Ok(Some(manifest))
}

/// Parse manifest text. `path` is only used in error messages.
pub fn parse_manifest(path: &Path, content: &str) -> AnalyzeResult<Manifest> {
    let malformed = |line: usize, message: String| AnalyzeError::ManifestMalformed {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut manifest = Manifest::default();
    // (kind, line the block opened on)
    let mut block: Option<(Block, usize)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = strip_comment(raw).split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if let Some((kind, _)) = block {
            if fields == [")"] {
                block = None;
                continue;
            }
            if kind == Block::Require {
                add_require(&mut manifest, &fields)
                    .map_err(|m| malformed(line_no, m))?;
            }
            continue;
        }

        let directive = fields[0];
        if directive == ")" {
            return Err(malformed(line_no, "unexpected ')'".to_string()));
        }

        let opens_block = fields.len() == 2 && fields[1] == "(";
        match directive {
            "module" | "go" if opens_block => {
                let message = format!("'{directive}' cannot be a block");
                return Err(malformed(line_no, message));
            }
            "module" => {
                if fields.len() != 2 {
                    return Err(malformed(line_no, "usage: module module/path".to_string()));
                }
                manifest.module_path = unquote(fields[1]).to_string();
            }
            "go" => {
                if fields.len() != 2 {
                    return Err(malformed(line_no, "usage: go 1.23".to_string()));
                }
                manifest.go_version = fields[1].to_string();
            }
            "require" if opens_block => block = Some((Block::Require, line_no)),
            "require" => {
                add_require(&mut manifest, &fields[1..])
                    .map_err(|m| malformed(line_no, m))?;
            }
            d if SKIPPED_DIRECTIVES.contains(&d) => {
                if opens_block {
                    block = Some((Block::Skipped, line_no));
                } else if fields.len() < 2 {
                    return Err(malformed(line_no, format!("'{d}' needs an argument")));
                }
            }
            unknown => {
                return Err(malformed(line_no, format!("unknown directive: {unknown}")));
            }
        }
    }

    if let Some((_, opened_at)) = block {
        return Err(malformed(opened_at, "unterminated block".to_string()));
    }

    Ok(manifest)
}

fn add_require(manifest: &mut Manifest, fields: &[&str]) -> Result<(), String> {
    match fields {
        [path, version] => {
            manifest
                .requires
                .insert(unquote(path).to_string(), unquote(version).to_string());
            Ok(())
        }
        [path] => Err(format!("missing version for {}", unquote(path))),
        _ => Err("usage: require module/path v1.2.3".to_string()),
    }
}

/// Drop a trailing `//` comment
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> AnalyzeResult<Manifest> {
        parse_manifest(&PathBuf::from("go.mod"), content)
    }

    fn malformed_line(content: &str) -> usize {
        match parse(content) {
            Err(AnalyzeError::ManifestMalformed { line, .. }) => line,
            other => panic!("expected ManifestMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_single_line_directives() {
        let content = concat!(
            "module example.com/app\n\n",
            "go 1.21\n",
            "require github.com/gin-gonic/gin v1.9.1\n",
        );
        let m = parse(content).unwrap();
        assert_eq!(m.module_path, "example.com/app");
        assert_eq!(m.go_version, "1.21");
        assert_eq!(m.requires["github.com/gin-gonic/gin"], "v1.9.1");
    }

    #[test]
    fn test_parse_require_block_with_comments() {
        let content = r#"// top comment
module "example.com/app"

go 1.22.1
toolchain go1.22.3

require (
    github.com/labstack/echo/v4 v4.11.4
    golang.org/x/net v0.20.0 // indirect

    "github.com/quoted/path" v1.0.0
)

replace (
    example.com/old => example.com/new v1.0.0
)
exclude example.com/bad v0.1.0
"#;
        let m = parse(content).unwrap();
        assert_eq!(m.module_path, "example.com/app");
        assert_eq!(m.go_version, "1.22.1");
        assert_eq!(m.requires.len(), 3);
        assert_eq!(m.requires["golang.org/x/net"], "v0.20.0");
        assert_eq!(m.requires["github.com/quoted/path"], "v1.0.0");
    }

    #[test]
    fn test_empty_manifest() {
        let m = parse("").unwrap();
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn test_malformed_inputs_report_line() {
        assert_eq!(malformed_line("module a\nfoo bar\n"), 2);
        assert_eq!(malformed_line("module a\nrequire x\n"), 2);
        assert_eq!(malformed_line("module a b\n"), 1);
        assert_eq!(malformed_line("go 1.21\n)\n"), 2);
        assert_eq!(malformed_line("module a\nrequire (\n  x v1\n"), 2);
        assert_eq!(malformed_line("require (\n  x\n)\n"), 2);
    }

    #[test]
    fn test_missing_version_message() {
        match parse("require example.com/x\n") {
            Err(AnalyzeError::ManifestMalformed { message, .. }) => {
                assert!(message.contains("missing version"));
            }
            other => panic!("expected ManifestMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_manifest(&dir.path().join("go.mod")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("go.mod");
        std::fs::write(&path, "module m\ngo 1.20\n").unwrap();
        let m = read_manifest(&path).unwrap().unwrap();
        assert_eq!(m.go_version, "1.20");
    }
}
