// Named admission scenarios, each checked end to end.

use clint_core::types::Position;
use clint_enforce::RuleEngine;

use super::common::{code, codes};

fn check(source: &str) -> Vec<clint_core::types::Violation> {
    RuleEngine::new().check_source(source).into_violations()
}

#[test]
fn test_reserved_name_scenario() {
    let violations = check("x = 1\n_temp = x\n");
    assert_eq!(codes(&violations), vec!["S2"]);
    assert!(violations[0].message.contains("_temp"));
    assert_eq!(violations[0].position.map(|p| p.line), Some(1));
}

#[test]
fn test_duplicate_constructor_scenario() {
    let source = "\
@construct
def a():
    pass

@construct
def b():
    pass

@export
def c():
    pass
";
    let violations = check(source);
    let dups: Vec<_> = violations.iter().filter(|v| code(v) == "S8").collect();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].position, Some(Position::new(5, 0)));
}

#[test]
fn test_missing_export_scenario() {
    let violations = check("balances = Hash()\n\n\ndef f():\n    pass\n\ndef g():\n    pass\n");
    assert_eq!(codes(&violations), vec!["S12"]);
    assert_eq!(violations[0].position, Some(Position::new(2, 0)));

    assert!(check("balances = Hash()\n").is_empty());
}

#[test]
fn test_storage_collision_scenario() {
    let source = "\
balances = Hash(default_value=0)

@export
def send(
    amount: float,
    balances: str,
):
    pass
";
    let violations = check(source);
    assert_eq!(codes(&violations), vec!["S14"]);
    assert_eq!(violations[0].position, Some(Position::new(5, 4)));
}

#[test]
fn test_annotation_scenario() {
    let violations = check("@export\ndef f(a, b, c: int) -> dict:\n    pass\n");
    assert_eq!(violations.iter().filter(|v| code(v) == "S16").count(), 2);
    assert_eq!(violations.iter().filter(|v| code(v) == "S17").count(), 1);
}

#[test]
fn test_idempotence() {
    let source = include_str!("../fixtures/rejected.py");
    let engine = RuleEngine::new();
    let runs: Vec<_> = (0..3).map(|_| engine.check_source(source)).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn test_parse_failure_aborts_analysis() {
    let violations = check("import os\n_x = 1\ndef broken(:\n");
    assert_eq!(violations.len(), 1);
    assert_eq!(code(&violations[0]), "E1");
}
