// Whole-contract checks through the public rule engine API.

use clint_core::types::Position;
use clint_enforce::RuleEngine;
use clint_parsers::ContractParser;

use super::common::{codes, REJECTED_CONTRACT, TOKEN_CONTRACT};

#[test]
fn test_token_contract_is_admitted() {
    let result = RuleEngine::new().check_source(TOKEN_CONTRACT);
    assert!(result.success(), "{:?}", result.violations());
}

#[test]
fn test_token_contract_via_parsed_tree() {
    let mut parser = ContractParser::new().unwrap();
    let tree = parser.parse(TOKEN_CONTRACT).unwrap();
    assert!(RuleEngine::new().check(&tree).success());
}

#[test]
fn test_rejected_contract_reports_every_rule() {
    let result = RuleEngine::new().check_source(REJECTED_CONTRACT);
    assert!(!result.success());
    let found = codes(result.violations());
    for expected in ["S13", "S5", "S2", "S19", "S12"] {
        assert!(found.contains(&expected), "missing {expected} in {found:?}");
    }
}

#[test]
fn test_rejected_contract_positions() {
    let result = RuleEngine::new().check_source(REJECTED_CONTRACT);
    let violations = result.violations();

    let import = violations.iter().find(|v| v.message.ends_with(": os")).unwrap();
    assert_eq!(import.position, Some(Position::new(0, 0)));

    let class = violations.iter().find(|v| v.message.starts_with("S5-")).unwrap();
    assert_eq!(class.position, Some(Position::new(3, 0)));

    let export = violations.iter().find(|v| v.message.starts_with("S12-")).unwrap();
    assert_eq!(export.position, Some(Position::new(5, 0)));
}

#[test]
fn test_success_iff_no_violations() {
    for source in [TOKEN_CONTRACT, REJECTED_CONTRACT, "", "x = (", "lambda: 0\n"] {
        let result = RuleEngine::new().check_source(source);
        assert_eq!(result.success(), result.violations().is_empty());
    }
}
