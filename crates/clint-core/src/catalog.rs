//! The fixed catalog of violation kinds.
//!
//! Every message the rule engine emits starts with the kind's code so callers
//! can key on it without parsing prose, e.g. `S2- Illicit use of '_' ... : _temp`.

use crate::types::{Position, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    IllegalSyntax,
    ReservedName,
    NestedImport,
    ImportFrom,
    ClassDefinition,
    AsyncDefinition,
    InvalidDecorator,
    DuplicateConstructor,
    MultipleDecorators,
    ForeignStorageKeyword,
    StorageTupleTarget,
    MissingExport,
    IllegalBuiltin,
    StorageNameReuse,
    InvalidAnnotation,
    MissingAnnotation,
    ReturnAnnotation,
    NestedFunction,
    RuntimeAccess,
    SyntaxError,
    InternalFault,
    AnalyzerFailure,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 22] = [
        ViolationKind::IllegalSyntax,
        ViolationKind::ReservedName,
        ViolationKind::NestedImport,
        ViolationKind::ImportFrom,
        ViolationKind::ClassDefinition,
        ViolationKind::AsyncDefinition,
        ViolationKind::InvalidDecorator,
        ViolationKind::DuplicateConstructor,
        ViolationKind::MultipleDecorators,
        ViolationKind::ForeignStorageKeyword,
        ViolationKind::StorageTupleTarget,
        ViolationKind::MissingExport,
        ViolationKind::IllegalBuiltin,
        ViolationKind::StorageNameReuse,
        ViolationKind::InvalidAnnotation,
        ViolationKind::MissingAnnotation,
        ViolationKind::ReturnAnnotation,
        ViolationKind::NestedFunction,
        ViolationKind::RuntimeAccess,
        ViolationKind::SyntaxError,
        ViolationKind::InternalFault,
        ViolationKind::AnalyzerFailure,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::IllegalSyntax => "S1",
            ViolationKind::ReservedName => "S2",
            ViolationKind::NestedImport => "S3",
            ViolationKind::ImportFrom => "S4",
            ViolationKind::ClassDefinition => "S5",
            ViolationKind::AsyncDefinition => "S6",
            ViolationKind::InvalidDecorator => "S7",
            ViolationKind::DuplicateConstructor => "S8",
            ViolationKind::MultipleDecorators => "S9",
            ViolationKind::ForeignStorageKeyword => "S10",
            ViolationKind::StorageTupleTarget => "S11",
            ViolationKind::MissingExport => "S12",
            ViolationKind::IllegalBuiltin => "S13",
            ViolationKind::StorageNameReuse => "S14",
            ViolationKind::InvalidAnnotation => "S15",
            ViolationKind::MissingAnnotation => "S16",
            ViolationKind::ReturnAnnotation => "S17",
            ViolationKind::NestedFunction => "S18",
            ViolationKind::RuntimeAccess => "S19",
            ViolationKind::SyntaxError => "E1",
            ViolationKind::InternalFault => "E2",
            ViolationKind::AnalyzerFailure => "E3",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            ViolationKind::IllegalSyntax => "Illegal contracting syntax type used",
            ViolationKind::ReservedName => "Illicit use of '_' before or after a name",
            ViolationKind::NestedImport => "Illicit use of nested imports",
            ViolationKind::ImportFrom => "ImportFrom compilation nodes are not supported",
            ViolationKind::ClassDefinition => "Illicit use of classes",
            ViolationKind::AsyncDefinition => "Illicit use of async functions",
            ViolationKind::InvalidDecorator => "Invalid decorator used",
            ViolationKind::DuplicateConstructor => "Multiple use of constructors detected",
            ViolationKind::MultipleDecorators => "Illicit use of multiple decorators",
            ViolationKind::ForeignStorageKeyword => {
                "Illicit keyword overloading for ORM assignments"
            }
            ViolationKind::StorageTupleTarget => "Multiple targets to ORM definition detected",
            ViolationKind::MissingExport => "No valid contracting decorator found",
            ViolationKind::IllegalBuiltin => "Illegal use of a builtin",
            ViolationKind::StorageNameReuse => {
                "Reuse of ORM name definition in a function definition argument name"
            }
            ViolationKind::InvalidAnnotation => "Illegal argument annotation used",
            ViolationKind::MissingAnnotation => "No valid argument annotation found",
            ViolationKind::ReturnAnnotation => "Illegal use of return annotation",
            ViolationKind::NestedFunction => "Illegal use of a nested function definition",
            ViolationKind::RuntimeAccess => "Illegal use of the runtime accessor",
            ViolationKind::SyntaxError => "Syntax error",
            ViolationKind::InternalFault => "Unexpected error during linting",
            ViolationKind::AnalyzerFailure => "External analyzer failed",
        }
    }

    /// Render the message, appending `detail` after the catalog text when present.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(d) if !d.is_empty() => format!("{}- {} : {}", self.code(), self.text(), d),
            _ => format!("{}- {}", self.code(), self.text()),
        }
    }

    pub fn violation(&self, detail: Option<&str>, position: Option<Position>) -> Violation {
        Violation::error(self.message(detail), position)
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}- {}", self.code(), self.text())
    }
}
