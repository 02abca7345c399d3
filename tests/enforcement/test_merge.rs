// Stage-A findings merged with rule-engine findings.

use clint_core::types::{Position, Violation};
use clint_core::whitelist::WhitelistConfig;
use clint_enforce::normalize::{merge, standardize_message};

use super::common::{code, mock_linter, TOKEN_CONTRACT};

#[test]
fn test_dedup_on_standardized_message() {
    let a = vec![Violation::at("S2- Illicit use of '_' before or after a name : _x (unknown-location, line 1)", 0, 0)];
    let b = vec![Violation::at("S2- Illicit use of '_' before or after a name : _x", 0, 0)];
    let merged = merge(a, b);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].position, Some(Position::new(0, 0)));
}

#[test]
fn test_standardize_is_stable() {
    let once = standardize_message("undefined name 'q' (unknown-location, line 9)");
    assert_eq!(standardize_message(&once), once);
}

#[test]
fn test_whitelisted_findings_never_surface() {
    let (linter, mock) = mock_linter();
    mock.set_output(
        TOKEN_CONTRACT,
        "<stdin>:1:12: undefined name 'Hash'\n\
         <stdin>:4:2: undefined name 'construct'\n\
         <stdin>:9:31: undefined name 'ctx'\n",
    );
    let result = linter.lint_blocking(TOKEN_CONTRACT, &WhitelistConfig::default());
    assert!(result.success(), "{:?}", result.violations());
}

#[test]
fn test_custom_whitelist_replaces_default() {
    let (linter, mock) = mock_linter();
    mock.set_output(TOKEN_CONTRACT, "<stdin>:1:12: undefined name 'Hash'\n");
    let whitelist = WhitelistConfig::from_patterns(["something_else"]);
    let result = linter.lint_blocking(TOKEN_CONTRACT, &whitelist);
    assert_eq!(result.violations().len(), 1);
    assert_eq!(result.violations()[0].message, "undefined name 'Hash'");
    assert_eq!(result.violations()[0].position, Some(Position::new(0, 11)));
}

#[test]
fn test_analyzer_failure_is_contained() {
    let (linter, mock) = mock_linter();
    mock.set_failure(TOKEN_CONTRACT, "No module named pyflakes");
    let result = linter.lint_blocking(TOKEN_CONTRACT, &WhitelistConfig::default());
    assert!(!result.success());
    assert_eq!(code(&result.violations()[0]), "E3");
    assert_eq!(result.violations()[0].position, None);
}
