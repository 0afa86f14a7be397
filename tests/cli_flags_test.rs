//! CLI flag contract tests
//!
//! Runs the real binary and checks --path, --output, --workers, the SGO_*
//! environment variables and the exit code on fatal errors.

use std::path::Path;
use std::process::Command;

fn sgo_bin() -> String {
    env!("CARGO_BIN_EXE_sgo").to_string()
}

fn setup_test_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("go.mod"),
        "module example.com/demo\n\ngo 1.21\n\nrequire github.com/gin-gonic/gin v1.9.1\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("main.go"),
        r#"package main

import "github.com/gin-gonic/gin"

// TODO: add graceful shutdown
func main() {
	r := gin.Default()
	r.Run()
}
"#,
    )
    .unwrap();
    dir
}

fn command() -> Command {
    let mut cmd = Command::new(sgo_bin());
    cmd.env_remove("SGO_PATH")
        .env_remove("SGO_OUTPUT")
        .env_remove("RUST_LOG")
        .arg("--no-progress");
    cmd
}

fn run(cmd: &mut Command) -> (i32, String, String) {
    let output = cmd.output().expect("Failed to run sgo");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (code, stdout, stderr)
}

fn run_with_path(dir: &Path, extra_args: &[&str]) -> (i32, String, String) {
    let mut cmd = command();
    cmd.arg("--path").arg(dir);
    for arg in extra_args {
        cmd.arg(arg);
    }
    run(&mut cmd)
}

fn parse_json(json_str: &str) -> serde_json::Value {
    serde_json::from_str(json_str).expect("Invalid JSON")
}

#[test]
fn test_json_output() {
    let dir = setup_test_project();
    let (code, stdout, _) = run_with_path(dir.path(), &["--output", "json"]);
    assert_eq!(code, 0);

    let v = parse_json(&stdout);
    assert_eq!(v["go_version"], "1.21");
    assert_eq!(v["total_go_files"], 1);
    assert_eq!(v["frameworks"], serde_json::json!(["gin"]));
    assert_eq!(v["todos"].as_array().unwrap().len(), 1);
    assert_eq!(v["summary"]["score"], 95);
    assert_eq!(v["summary"]["status"], "PERFECT");
}

#[test]
fn test_text_output_is_default() {
    let dir = setup_test_project();
    let (code, stdout, _) = run_with_path(dir.path(), &[]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Project Analysis Results:"));
    assert!(stdout.contains("Status: PERFECT (Score: 95)"));
    assert!(stdout.contains("Packages Used:\ngithub.com/gin-gonic/gin: v1.9.1"));
}

#[test]
fn test_short_flags() {
    let dir = setup_test_project();
    let mut cmd = command();
    cmd.arg("-p").arg(dir.path()).args(["-o", "json"]);
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["total_go_files"], 1);
}

#[test]
fn test_env_vars() {
    let dir = setup_test_project();
    let mut cmd = command();
    cmd.env("SGO_PATH", dir.path()).env("SGO_OUTPUT", "json");
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["module_path"], "example.com/demo");
}

#[test]
fn test_workers_flag() {
    let dir = setup_test_project();
    let (code, stdout, _) = run_with_path(dir.path(), &["-o", "json", "--workers", "1"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["total_go_files"], 1);

    let (code, _, _) = run_with_path(dir.path(), &["--workers", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_unknown_output_format_fails() {
    let dir = setup_test_project();
    let (code, stdout, stderr) = run_with_path(dir.path(), &["-o", "sarif"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown format"));
}

#[test]
fn test_missing_root_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let (code, stdout, stderr) = run_with_path(&missing, &[]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("cannot read project root"));
}

#[test]
fn test_malformed_manifest_exits_nonzero() {
    let dir = setup_test_project();
    std::fs::write(dir.path().join("go.mod"), "module m\nbogus directive\n").unwrap();
    let (code, _, stderr) = run_with_path(dir.path(), &[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown directive"));
}

#[test]
fn test_project_config_default_output() {
    let dir = setup_test_project();
    let config = dir.path().join("sgo.toml");
    std::fs::write(config, "[defaults]\noutput = \"json\"\n").unwrap();

    let (code, stdout, _) = run_with_path(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["go_version"], "1.21");

    // Explicit flag wins over sgo.toml
    let (_, stdout, _) = run_with_path(dir.path(), &["-o", "text"]);
    assert!(stdout.starts_with("Project Analysis Results:"));
}

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(Command::new(sgo_bin()).arg("--version"));
    assert_eq!(code, 0);
    assert!(stdout.starts_with("sgo "));
}
