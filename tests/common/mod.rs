/// Shared test helpers for clint integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use clint_core::types::Violation;
use clint_enforce::{Linter, MockAnalyzer, RuleEngine};

/// A complete contract every rule accepts.
pub const TOKEN_CONTRACT: &str = include_str!("../fixtures/token.py");

/// A contract that trips several rules at once.
#[allow(dead_code)]
pub const REJECTED_CONTRACT: &str = include_str!("../fixtures/rejected.py");

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Linter backed by a scripted analyzer, so no Python is needed.
#[allow(dead_code)]
pub fn mock_linter() -> (Arc<Linter>, Arc<MockAnalyzer>) {
    let mock = Arc::new(MockAnalyzer::new());
    let linter = Linter::new(RuleEngine::new(), mock.clone());
    (Arc::new(linter), mock)
}

/// The `S<n>`/`E<n>` code of a catalog message, or the whole message.
#[allow(dead_code)]
pub fn code(v: &Violation) -> &str {
    match v.message.split_once("- ") {
        Some((code, _)) => code,
        None => v.message.as_str(),
    }
}

#[allow(dead_code)]
pub fn codes(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(code).collect()
}

/// Path to the compiled clint binary. Builds it if it does not exist yet.
#[allow(dead_code)]
pub fn clint_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("clint");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "clint-cli"])
            .status()
            .expect("Failed to build clint");
        assert!(status.success(), "Failed to build clint binary");
    }
    path
}
