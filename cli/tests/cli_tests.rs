//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("fixpoint").expect("binary should exist")
}

fn nested_doc() -> String {
    serde_json::json!({
        "allOf": [{ "allOf": [{ "type": "string" }] }]
    })
    .to_string()
}

// ── Simplify to File ────────────────────────────────────────────────────────

#[test]
fn test_simplify_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.json");
    let output = dir.path().join("out.json");

    fs::write(&input, nested_doc()).unwrap();

    cmd()
        .args(["simplify", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let out_content = fs::read_to_string(&output).expect("output file should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&out_content).expect("output should be valid JSON");
    assert_eq!(parsed, serde_json::json!({ "type": "string" }));
}

// ── Simplify to Stdout ──────────────────────────────────────────────────────

#[test]
fn test_simplify_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.json");
    fs::write(&input, nested_doc()).unwrap();

    cmd()
        .args(["simplify", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\""));
}

// ── Divergence ──────────────────────────────────────────────────────────────

#[test]
fn test_divergence_exits_nonzero_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deep.json");

    // Five wrapper layers but only 2 iterations allowed.
    let mut doc = serde_json::json!({ "type": "boolean" });
    for _ in 0..5 {
        doc = serde_json::json!({ "allOf": [doc] });
    }
    fs::write(&input, doc.to_string()).unwrap();

    cmd()
        .args(["simplify", input.to_str().unwrap()])
        .args(["--max-iterations", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum iteration count"))
        .stderr(predicate::str::contains("deep.json"));
}

#[test]
fn test_raised_ceiling_converges() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deep.json");

    let mut doc = serde_json::json!({ "type": "boolean" });
    for _ in 0..5 {
        doc = serde_json::json!({ "allOf": [doc] });
    }
    fs::write(&input, doc.to_string()).unwrap();

    cmd()
        .args(["simplify", input.to_str().unwrap()])
        .args(["--max-iterations", "8", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"type\":\"boolean\"}"));
}

// ── Bad input ───────────────────────────────────────────────────────────────

#[test]
fn test_missing_input_file_fails() {
    cmd()
        .args(["simplify", "/nonexistent/doc.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    cmd()
        .args(["simplify", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"));
}

// ── Capabilities ────────────────────────────────────────────────────────────

#[test]
fn test_capabilities_lists_json() {
    cmd()
        .arg("capabilities")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"));
}
