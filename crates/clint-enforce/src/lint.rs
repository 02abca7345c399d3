use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use clint_core::catalog::ViolationKind;
use clint_core::config::ClintConfig;
use clint_core::types::{CheckResult, Violation};
use clint_core::whitelist::WhitelistConfig;

use crate::engine::{internal_fault, RuleEngine};
use crate::normalize;
use crate::stage_a::{self, AnalyzerError, DiagnosticSource, PyflakesCommand};

/// Runs Stage A and the rule engine side by side and merges their findings.
///
/// Shared read-only between requests; each lint owns its own parse tree and
/// rule state.
pub struct Linter {
    engine: RuleEngine,
    analyzer: Arc<dyn DiagnosticSource>,
}

impl Linter {
    pub fn new(engine: RuleEngine, analyzer: Arc<dyn DiagnosticSource>) -> Self {
        Self { engine, analyzer }
    }

    pub fn from_config(config: &ClintConfig) -> Result<Self, AnalyzerError> {
        let analyzer = PyflakesCommand::from_config(&config.analyzer)?;
        Ok(Self::new(
            RuleEngine::with_config(&config.rules),
            Arc::new(analyzer),
        ))
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Lint on the current thread, running both stages in parallel on the
    /// rayon pool.
    pub fn lint_blocking(&self, source: &str, whitelist: &WhitelistConfig) -> CheckResult {
        let (stage_a, rules) = rayon::join(
            || self.stage_a(source, whitelist),
            || self.rules(source),
        );
        CheckResult::from_violations(normalize::merge(stage_a, rules))
    }

    /// Lint from async code. Both stages are CPU- or process-bound, so each
    /// runs on the blocking pool; this task only waits for the join.
    pub async fn lint(self: &Arc<Self>, source: Arc<str>, whitelist: Arc<WhitelistConfig>) -> CheckResult {
        let stage_a = {
            let linter = Arc::clone(self);
            let source = Arc::clone(&source);
            tokio::task::spawn_blocking(move || linter.stage_a(&source, &whitelist))
        };
        let rules = {
            let linter = Arc::clone(self);
            tokio::task::spawn_blocking(move || linter.rules(&source))
        };
        let (stage_a, rules) = tokio::join!(stage_a, rules);
        let stage_a = stage_a.unwrap_or_else(|e| vec![join_failure("stage A", e)]);
        let rules = rules.unwrap_or_else(|e| vec![join_failure("rule engine", e)]);
        CheckResult::from_violations(normalize::merge(stage_a, rules))
    }

    /// Rule-engine findings alone, for callers that skip Stage A.
    pub fn lint_rules_only(&self, source: &str) -> CheckResult {
        CheckResult::from_violations(normalize::merge(Vec::new(), self.rules(source)))
    }

    fn stage_a(&self, source: &str, whitelist: &WhitelistConfig) -> Vec<Violation> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            stage_a::run(self.analyzer.as_ref(), source, whitelist)
        }))
        .unwrap_or_else(|payload| vec![internal_fault(payload)])
    }

    fn rules(&self, source: &str) -> Vec<Violation> {
        self.engine.check_source(source).into_violations()
    }
}

fn join_failure(stage: &str, err: tokio::task::JoinError) -> Violation {
    tracing::warn!(stage, error = %err, "lint task did not complete");
    let detail = format!("{stage}: {err}");
    ViolationKind::InternalFault.violation(Some(&detail), None)
}
