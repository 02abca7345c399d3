//! Output formatters for clint check results.
//!
//! Two output modes:
//! - **JSON** (`--json`): the `CheckResult` wire shape, one document per run
//! - **Human** (default): compiler-style diagnostics for terminal users

pub mod human;
pub mod json;

use clint_core::types::CheckResult;
use serde::Serialize;

/// Result of linting one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: CheckResult,
}

impl FileReport {
    pub fn new(file: impl Into<String>, result: CheckResult) -> Self {
        Self {
            file: file.into(),
            result,
        }
    }
}

pub trait OutputFormatter {
    /// A single result with no file attached, as the HTTP transport returns it.
    fn format_check(&self, result: &CheckResult) -> String;
    /// Results for every file in one CLI run.
    fn format_reports(&self, reports: &[FileReport]) -> String;
}
