// Configuration flows from clint.json into the engine and linter.

use clint_core::config::ClintConfig;
use clint_enforce::{Linter, RuleEngine};

#[test]
fn test_config_drives_engine_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clint.json");
    std::fs::write(&path, r#"{ "rules": { "max_depth": 3 } }"#).unwrap();

    let config = ClintConfig::load(&path);
    let engine = RuleEngine::with_config(&config.rules);
    assert_eq!(engine.max_depth(), 3);
    let result = engine.check_source("x = [[[[[1]]]]]\n");
    assert!(!result.success());
}

#[test]
fn test_config_analyzer_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clint.json");
    std::fs::write(&path, r#"{ "analyzer": { "command": ["flake-runner", "--stdin"] } }"#).unwrap();
    let config = ClintConfig::load(&path);
    let linter = Linter::from_config(&config).unwrap();
    assert_eq!(linter.analyzer_name(), "pyflakes");
}

#[test]
fn test_empty_analyzer_command_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clint.json");
    std::fs::write(&path, r#"{ "analyzer": { "command": [] } }"#).unwrap();
    let config = ClintConfig::load(&path);
    assert!(Linter::from_config(&config).is_err());
}
