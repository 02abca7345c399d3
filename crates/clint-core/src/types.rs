use serde::{Deserialize, Serialize};

/// Severity of a violation. Admission control only ever rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// 0-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// One normalized finding. A violation without a position is module-level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<Position>,
}

impl Violation {
    pub fn error(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            position,
        }
    }

    /// Module-level violation with no source position.
    pub fn module_level(message: impl Into<String>) -> Self {
        Self::error(message, None)
    }

    pub fn at(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::error(message, Some(Position::new(line, column)))
    }
}

/// Outcome of one check. `success` is derived from `violations` at
/// construction and never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    success: bool,
    violations: Vec<Violation>,
}

impl CheckResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            success: violations.is_empty(),
            violations,
        }
    }

    pub fn clean() -> Self {
        Self::from_violations(Vec::new())
    }

    /// A failed result carrying a single violation.
    pub fn single(violation: Violation) -> Self {
        Self::from_violations(vec![violation])
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
