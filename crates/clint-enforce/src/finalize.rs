//! Checks that need the whole tree walked first.

use std::collections::VecDeque;

use clint_core::catalog::ViolationKind;
use clint_core::types::Position;
use clint_core::vocab;
use clint_parsers::{NodeKind, SourceTree};
use tree_sitter::Node;

use crate::rules;
use crate::state::RuleState;

pub fn run(tree: &SourceTree, state: &mut RuleState) {
    check_storage_name_reuse(state);
    check_export_present(tree, state);
    check_annotations(state);
    check_return_annotations(state);
}

/// Exported arguments may not shadow a declared storage name.
fn check_storage_name_reuse(state: &mut RuleState) {
    let clashes: Vec<(String, Position)> = state
        .visited_args
        .iter()
        .filter(|(name, _)| state.storage_names.contains(name))
        .cloned()
        .collect();
    for (name, position) in clashes {
        state.report(ViolationKind::StorageNameReuse, Some(&name), Some(position));
    }
}

/// A module with functions must export at least one of them. The violation
/// sits on the line before the first function; a function on the first line
/// makes it module-level. A module without functions is exempt.
fn check_export_present(tree: &SourceTree, state: &mut RuleState) {
    if state.has_export {
        return;
    }
    let Some(first) = first_function(tree.root()) else {
        return;
    };
    let position = match rules::position_of(first) {
        Position { line: 0, .. } => None,
        Position { line, .. } => Some(Position::new(line - 1, 0)),
    };
    state.report(ViolationKind::MissingExport, None, position);
}

/// Breadth-first search for the first synchronous function definition.
/// Levels follow statement nesting, so a decorated `def` and a bare one at
/// the same scope are siblings.
fn first_function(root: Node<'_>) -> Option<Node<'_>> {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        if SourceTree::kind(node) == NodeKind::FunctionDefinition && !rules::is_async(node) {
            return Some(node);
        }
        push_statement_children(node, &mut queue);
    }
    None
}

/// Children of `node` with grammar-only wrappers flattened away: `block`
/// and `else` contribute their statements, a decorated definition stands
/// for the definition itself.
fn push_statement_children<'t>(node: Node<'t>, queue: &mut VecDeque<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match SourceTree::kind(child) {
            NodeKind::Block | NodeKind::Else => push_statement_children(child, queue),
            NodeKind::DecoratedDefinition => match child.child_by_field_name("definition") {
                Some(def) => queue.push_back(def),
                None => queue.push_back(child),
            },
            _ => queue.push_back(child),
        }
    }
}

fn check_annotations(state: &mut RuleState) {
    let entries = state.arg_annotations.to_vec();
    for (annotation, position) in entries {
        match annotation {
            None => state.report(ViolationKind::MissingAnnotation, None, Some(position)),
            Some(name) if !vocab::is_allowed_annotation(&name) => {
                state.report(ViolationKind::InvalidAnnotation, Some(&name), Some(position));
            }
            Some(_) => {}
        }
    }
}

fn check_return_annotations(state: &mut RuleState) {
    let entries = state.return_annotations.to_vec();
    for (annotation, position) in entries {
        if let Some(name) = annotation {
            state.report(ViolationKind::ReturnAnnotation, Some(&name), Some(position));
        }
    }
}
