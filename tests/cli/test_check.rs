// Tests for `clint check` output formats.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

use super::common::{clint_bin, fixture_path, REJECTED_CONTRACT, TOKEN_CONTRACT};

fn contracts_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_token.py"), TOKEN_CONTRACT).unwrap();
    fs::write(dir.path().join("b_rejected.py"), REJECTED_CONTRACT).unwrap();
    fs::write(dir.path().join("README.md"), "# contracts\n").unwrap();
    dir
}

#[test]
fn test_check_json_reports_every_file() {
    let dir = contracts_dir();
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only", "--json", "."])
        .current_dir(dir.path())
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["success"], false);
    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0]["file"].as_str().unwrap().ends_with("a_token.py"));
    assert_eq!(files[0]["success"], true);
    assert_eq!(files[1]["success"], false);
}

#[test]
fn test_check_human_output_points_at_lines() {
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only"])
        .arg(fixture_path("rejected.py"))
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("error[S5]"), "{stdout}");
    assert!(stdout.contains("rejected.py:4:1"), "{stdout}");
}

#[test]
fn test_check_uses_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nested.py"), "x = [[[[[[1]]]]]]\n").unwrap();
    fs::write(dir.path().join("clint.json"), r#"{ "rules": { "max_depth": 3 } }"#).unwrap();
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only", "--json", "nested.py"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}
