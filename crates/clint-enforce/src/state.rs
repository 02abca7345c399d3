use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use clint_core::catalog::ViolationKind;
use clint_core::types::{Position, Violation};

/// Cross-node accumulator for one rule-engine invocation.
///
/// Created fresh for every check and owned by the traversal; it is never
/// shared between checks.
#[derive(Debug, Default)]
pub struct RuleState {
    violations: Vec<Violation>,
    /// Names bound to storage declarations.
    pub(crate) storage_names: BTreeSet<String>,
    /// (argument name, position) for exported-function arguments.
    pub(crate) visited_args: Records<(String, Position)>,
    /// (annotation, position) for exported-function arguments.
    pub(crate) arg_annotations: Records<(Option<String>, Position)>,
    /// (return annotation, position of the function) for exported functions.
    pub(crate) return_annotations: Records<(Option<String>, Position)>,
    pub(crate) has_export: bool,
    pub(crate) constructor_seen: bool,
    /// Number of enclosing function bodies at the current node.
    pub(crate) function_depth: usize,
    pub(crate) depth_exceeded: bool,
}

impl RuleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: ViolationKind, detail: Option<&str>, position: Option<Position>) {
        self.violations.push(kind.violation(detail, position));
    }

    pub fn record_storage_name(&mut self, name: &str) {
        self.storage_names.insert(name.to_string());
    }

    pub fn record_argument(&mut self, name: &str, position: Position) {
        self.visited_args.insert((name.to_string(), position));
    }

    pub fn record_arg_annotation(&mut self, annotation: Option<String>, position: Position) {
        self.arg_annotations.insert((annotation, position));
    }

    pub fn record_return_annotation(&mut self, annotation: Option<String>, position: Position) {
        self.return_annotations.insert((annotation, position));
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Set semantics with insertion order kept, so output is reproducible.
#[derive(Debug)]
pub(crate) struct Records<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Records<T> {
    /// Append `item` unless an equal one was recorded before.
    pub(crate) fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
