// Integration test entry point for rule engine and linter behavior.
#[path = "common/mod.rs"]
mod common;

#[path = "enforcement/test_contracts.rs"]
mod test_contracts;
#[path = "enforcement/test_scenarios.rs"]
mod test_scenarios;
#[path = "enforcement/test_merge.rs"]
mod test_merge;
#[path = "enforcement/test_concurrency.rs"]
mod test_concurrency;
#[path = "enforcement/test_config.rs"]
mod test_config;
