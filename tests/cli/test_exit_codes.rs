// Exit codes: 0 clean, 1 violations, 2 usage or input errors.

use std::process::Command;

use super::common::{clint_bin, fixture_path};

#[test]
fn test_clean_contract_exits_zero() {
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only"])
        .arg(fixture_path("token.py"))
        .output()
        .unwrap();
    assert_eq!(
        out.status.code(),
        Some(0),
        "{}",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn test_violations_exit_one() {
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only"])
        .arg(fixture_path("rejected.py"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_missing_path_exits_two() {
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only", "/nonexistent/contract.py"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_directory_without_contracts_exits_two() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = Command::new(clint_bin())
        .args(["check", "--rules-only"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_unknown_shell_exits_two() {
    let out = Command::new(clint_bin())
        .args(["completion", "tcsh"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}
