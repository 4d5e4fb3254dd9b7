//! Golden tests for output schema stability.
//!
//! These tests verify that CLI JSON output matches expected golden files.
//! Golden files are the contract between encap and its consumers.
//!
//! ## Updating Golden Files
//!
//! When making intentional schema changes:
//! ```bash
//! ENCAP_UPDATE_GOLDEN=1 cargo test --test golden
//! git diff tests/golden/  # Review changes
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// Directory containing golden test fixtures.
fn golden_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join("fixtures")
}

/// Directory containing expected output files.
fn golden_output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join("output_schema")
}

/// Path to the encap binary under test.
fn encap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_encap"))
}

/// Check if golden update mode is enabled.
fn update_mode() -> bool {
    std::env::var("ENCAP_UPDATE_GOLDEN").is_ok()
}

/// Normalize JSON for comparison.
///
/// - Removes `message` fields: they carry rendered source snippets and OS
///   error text, which are covered by unit tests and vary by platform.
/// - Sorts object keys for deterministic comparison.
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized: serde_json::Map<String, Value> = serde_json::Map::new();
            for (k, v) in map {
                if k == "message" {
                    continue;
                }
                normalized.insert(k.clone(), normalize_json(v));
            }
            Value::Object(normalized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        other => other.clone(),
    }
}

/// Compare two JSON values and return a diff if they don't match.
fn compare_json(expected: &Value, actual: &Value) -> Result<(), String> {
    let expected_normalized = normalize_json(expected);
    let actual_normalized = normalize_json(actual);

    if expected_normalized == actual_normalized {
        Ok(())
    } else {
        let expected_str = serde_json::to_string_pretty(&expected_normalized).unwrap();
        let actual_str = serde_json::to_string_pretty(&actual_normalized).unwrap();

        Err(format!(
            "JSON mismatch:\n--- expected ---\n{}\n--- actual ---\n{}",
            expected_str, actual_str
        ))
    }
}

/// The result of one CLI invocation inside a temp workspace.
struct RunResult {
    status: std::process::ExitStatus,
    stdout: String,
    stderr: String,
    workspace: TempDir,
}

/// Run the encap binary in a fresh temp workspace seeded from a fixture.
///
/// Fixture files are copied flat into the workspace, so tests can pass the
/// relative path `src.go` and get deterministic paths in the output.
fn run_encap(fixture: Option<&str>, args: &[&str]) -> RunResult {
    let workspace = TempDir::new().expect("create temp workspace");

    if let Some(fixture) = fixture {
        let fixture_dir = golden_fixtures_dir().join(fixture);
        for entry in fs::read_dir(&fixture_dir).expect("read fixture dir") {
            let entry = entry.expect("read fixture entry");
            let dest = workspace.path().join(entry.file_name());
            fs::copy(entry.path(), &dest).expect("copy fixture file");
        }
    }

    let output = Command::new(encap_binary())
        .current_dir(workspace.path())
        .args(args)
        .output()
        .expect("run encap binary");

    RunResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        workspace,
    }
}

/// Read a file from a fixture directory.
fn fixture_file(fixture: &str, name: &str) -> String {
    let path = golden_fixtures_dir().join(fixture).join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path:?}: {e}"))
}

/// Read a file from the temp workspace after a run.
fn workspace_file(result: &RunResult, name: &str) -> String {
    let path = result.workspace.path().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path:?}: {e}"))
}

/// Run a golden test: invoke the CLI and compare its JSON output.
fn run_golden_test(
    command_args: &[&str],
    golden_file: &str,
    fixture_name: Option<&str>,
) -> Result<(), String> {
    let result = run_encap(fixture_name, command_args);

    let actual: Value = serde_json::from_str(&result.stdout).map_err(|e| {
        format!(
            "Failed to parse output as JSON: {}\nOutput: {}",
            e, result.stdout
        )
    })?;

    let golden_path = golden_output_dir().join(golden_file);

    if update_mode() {
        let normalized = normalize_json(&actual);
        let pretty = serde_json::to_string_pretty(&normalized)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        fs::write(&golden_path, pretty + "\n")
            .map_err(|e| format!("Failed to write golden file: {}", e))?;
        eprintln!("Updated golden file: {:?}", golden_path);
        Ok(())
    } else {
        let golden_content = fs::read_to_string(&golden_path)
            .map_err(|e| format!("Failed to read golden file {:?}: {}", golden_path, e))?;
        let expected: Value = serde_json::from_str(&golden_content)
            .map_err(|e| format!("Failed to parse golden file: {}", e))?;

        compare_json(&expected, &actual)
    }
}

// ============================================================================
// Success Schema Tests
// ============================================================================

#[test]
fn golden_run_success() {
    let result = run_golden_test(
        &["src.go", "Field", "GetField", "SetField", "--json"],
        "run_success.json",
        Some("accessor"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

#[test]
fn golden_run_leftover_warning() {
    let result = run_golden_test(
        &["src.go", "Field", "GetField", "SetField", "--json"],
        "run_leftover_warning.json",
        Some("multi_target"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

#[test]
fn golden_run_reanchored() {
    let result = run_golden_test(
        &[
            "src.go",
            "Field",
            "GetField",
            "SetField",
            "--json",
            "--comment-policy",
            "reanchor",
        ],
        "run_reanchored.json",
        Some("assign_comment"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

// ============================================================================
// Error Schema Tests
// ============================================================================

#[test]
fn golden_error_invalid_arguments() {
    let result = run_golden_test(
        &["src.go", "1bad", "GetField", "SetField", "--json"],
        "error_invalid_arguments.json",
        Some("accessor"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

#[test]
fn golden_error_parse() {
    let result = run_golden_test(
        &["src.go", "Field", "GetField", "SetField", "--json"],
        "error_parse.json",
        Some("parse_error"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

#[test]
fn golden_error_comment_loss() {
    let result = run_golden_test(
        &["src.go", "Field", "GetField", "SetField", "--json"],
        "error_comment_loss.json",
        Some("assign_comment"),
    );

    if let Err(e) = result {
        panic!("Golden test failed: {}", e);
    }
}

// ============================================================================
// Exit Codes and File Contents
// ============================================================================

#[test]
fn success_rewrites_file_in_place() {
    let result = run_encap(
        Some("accessor"),
        &["src.go", "Field", "GetField", "SetField"],
    );

    assert_eq!(result.status.code(), Some(0), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("accessor", "expected.go")
    );
    assert!(
        result.stdout.contains("rewrote 3 read(s) and 1 write(s)"),
        "stdout: {}",
        result.stdout
    );
}

#[test]
fn stdout_flag_prints_source_and_leaves_file_untouched() {
    let result = run_encap(
        Some("accessor"),
        &["src.go", "Field", "GetField", "SetField", "--stdout"],
    );

    assert_eq!(result.status.code(), Some(0), "stderr: {}", result.stderr);
    assert_eq!(result.stdout, fixture_file("accessor", "expected.go"));
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("accessor", "src.go")
    );
}

#[test]
fn leftover_write_warns_on_stderr() {
    let result = run_encap(
        Some("multi_target"),
        &["src.go", "Field", "GetField", "SetField"],
    );

    assert_eq!(result.status.code(), Some(0), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("multi_target", "src.go")
    );
    assert!(
        result.stderr.contains("warning[LeftoverWrite] src.go:4:4"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn reanchor_keeps_comment_and_warns_on_stderr() {
    let result = run_encap(
        Some("assign_comment"),
        &[
            "src.go",
            "Field",
            "GetField",
            "SetField",
            "--comment-policy",
            "reanchor",
        ],
    );

    assert_eq!(result.status.code(), Some(0), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("assign_comment", "expected.go")
    );
    assert!(
        result.stderr.contains("warning[ReanchoredComment]"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn missing_arguments_exit_with_usage_error() {
    let result = run_encap(None, &["src.go"]);

    assert_eq!(result.status.code(), Some(2), "stderr: {}", result.stderr);
}

#[test]
fn invalid_identifier_exits_with_invalid_arguments() {
    let result = run_encap(
        Some("accessor"),
        &["src.go", "1bad", "GetField", "SetField"],
    );

    assert_eq!(result.status.code(), Some(2), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("accessor", "src.go")
    );
}

#[test]
fn missing_file_exits_with_parse_error_code() {
    let result = run_encap(None, &["absent.go", "Field", "GetField", "SetField"]);

    assert_eq!(result.status.code(), Some(3), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("error:"), "stderr: {}", result.stderr);
}

#[test]
fn parse_error_exits_3_and_leaves_file_untouched() {
    let result = run_encap(
        Some("parse_error"),
        &["src.go", "Field", "GetField", "SetField"],
    );

    assert_eq!(result.status.code(), Some(3), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("parse_error", "src.go")
    );
    assert!(
        result.stderr.contains("parse error in src.go"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn comment_loss_exits_5_and_leaves_file_untouched() {
    let result = run_encap(
        Some("assign_comment"),
        &["src.go", "Field", "GetField", "SetField"],
    );

    assert_eq!(result.status.code(), Some(5), "stderr: {}", result.stderr);
    assert_eq!(
        workspace_file(&result, "src.go"),
        fixture_file("assign_comment", "src.go")
    );
    assert!(
        result.stderr.contains("comment would be dropped"),
        "stderr: {}",
        result.stderr
    );
}
