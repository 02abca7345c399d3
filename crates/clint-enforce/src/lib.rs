//! Admission-control enforcement for restricted-Python contracts.
//!
//! Produces the violations that keep a contract from being deployed:
//! - [`engine`]: single-pass rule engine over the parsed tree
//! - [`stage_a`]: adapter over an external general-purpose analyzer
//! - [`normalize`]: message standardization and order-preserving dedup
//! - [`lint`]: runs both analyses concurrently and merges their findings

pub mod engine;
pub mod finalize;
pub mod lint;
pub mod normalize;
pub mod rules;
pub mod stage_a;
pub mod state;

pub use engine::RuleEngine;
pub use lint::Linter;
pub use stage_a::{AnalyzerError, DiagnosticSource, PyflakesCommand};

#[cfg(any(test, feature = "test-support"))]
pub use stage_a::MockAnalyzer;
