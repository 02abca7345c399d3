use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use clint_core::catalog::ViolationKind;
use clint_core::config::RulesConfig;
use clint_core::types::{CheckResult, Position, Violation};
use clint_core::vocab;
use clint_parsers::treesitter::parse_source;
use clint_parsers::{NodeKind, ParseError, SourceTree};
use tree_sitter::Node;

use crate::finalize;
use crate::rules::{self, position_of};
use crate::state::RuleState;

/// Single-pass rule engine over a parsed contract.
///
/// The engine itself holds only limits. Every check builds a fresh
/// [`RuleState`], so one engine can serve any number of concurrent checks.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    max_depth: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::with_config(&RulesConfig::default())
    }

    /// Create an engine configured from the `rules` section of `clint.json`.
    pub fn with_config(config: &RulesConfig) -> Self {
        Self {
            max_depth: config.max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check a parsed tree. Never panics: an internal fault becomes a single
    /// violation describing it.
    pub fn check(&self, tree: &SourceTree) -> CheckResult {
        CheckResult::from_violations(self.violations(tree))
    }

    /// Parse and check `source`. A syntax error is reported as exactly one
    /// violation and no rules run.
    pub fn check_source(&self, source: &str) -> CheckResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match parse_source(source) {
            Ok(tree) => self.walk(&tree),
            Err(err) => vec![parse_failure(&err)],
        }));
        CheckResult::from_violations(outcome.unwrap_or_else(|payload| vec![internal_fault(payload)]))
    }

    /// Violations for a parsed tree, in traversal order followed by the
    /// post-traversal checks.
    pub fn violations(&self, tree: &SourceTree) -> Vec<Violation> {
        panic::catch_unwind(AssertUnwindSafe(|| self.walk(tree)))
            .unwrap_or_else(|payload| vec![internal_fault(payload)])
    }

    fn walk(&self, tree: &SourceTree) -> Vec<Violation> {
        let mut walker = Walker {
            tree,
            state: RuleState::new(),
            max_depth: self.max_depth,
        };
        walker.visit(tree.root(), 0);
        let mut state = walker.state;
        finalize::run(tree, &mut state);
        state.into_violations()
    }
}

/// Map a parser error onto the catalog.
pub fn parse_failure(err: &ParseError) -> Violation {
    match err {
        ParseError::Syntax {
            message,
            line,
            column,
        } => ViolationKind::SyntaxError
            .violation(Some(message.as_str()), Some(Position::new(*line, *column))),
        other => ViolationKind::InternalFault.violation(Some(&other.to_string()), None),
    }
}

pub(crate) fn internal_fault(payload: Box<dyn Any + Send>) -> Violation {
    let detail = panic_message(payload.as_ref());
    tracing::warn!(%detail, "rule engine fault converted to violation");
    ViolationKind::InternalFault.violation(Some(&detail), None)
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

struct Walker<'t> {
    tree: &'t SourceTree,
    state: RuleState,
    max_depth: usize,
}

impl<'t> Walker<'t> {
    fn visit(&mut self, node: Node<'t>, depth: usize) {
        if depth > self.max_depth {
            if !self.state.depth_exceeded {
                self.state.depth_exceeded = true;
                self.state.report(
                    ViolationKind::IllegalSyntax,
                    Some("nesting depth limit exceeded"),
                    Some(position_of(node)),
                );
            }
            return;
        }

        match SourceTree::kind(node) {
            NodeKind::Identifier => {
                rules::check_name_reference(&mut self.state, self.tree.text(node), position_of(node));
            }
            NodeKind::Attribute => self.visit_attribute(node, depth),
            NodeKind::Import => self.visit_import(node),
            NodeKind::ImportFrom | NodeKind::FutureImport => self.visit_import_from(node),
            NodeKind::ClassDefinition => self.visit_class(node, depth),
            NodeKind::DecoratedDefinition => self.visit_decorated(node, depth),
            NodeKind::FunctionDefinition => self.visit_function(node, &[], depth),
            NodeKind::Assignment => self.visit_assignment(node, depth),
            NodeKind::AugmentedAssignment => {
                self.check_operator(node, "@=", "matrix multiplication");
                self.visit_children(node, depth);
            }
            NodeKind::BinaryOperator => {
                self.check_operator(node, "@", "matrix multiplication");
                self.visit_children(node, depth);
            }
            NodeKind::For | NodeKind::ForInClause => {
                if rules::is_async(node) {
                    self.state.report(
                        ViolationKind::IllegalSyntax,
                        Some("async for"),
                        Some(position_of(node)),
                    );
                }
                self.visit_children(node, depth);
            }
            NodeKind::KeywordArgument => {
                if let Some(name) = node.child_by_field_name("name") {
                    rules::check_reserved_name(&mut self.state, self.tree.text(name), position_of(name));
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit(value, depth + 1);
                }
            }
            NodeKind::Comment | NodeKind::LineContinuation => {}
            NodeKind::Other(kind) => {
                self.state
                    .report(ViolationKind::IllegalSyntax, Some(kind), Some(position_of(node)));
                self.visit_children(node, depth);
            }
            _ => self.visit_children(node, depth),
        }
    }

    fn visit_children(&mut self, node: Node<'t>, depth: usize) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, depth + 1);
        }
    }

    fn check_operator(&mut self, node: Node<'t>, banned: &str, detail: &str) {
        let op = node.child_by_field_name("operator").map(|op| self.tree.text(op));
        if op == Some(banned) {
            self.state
                .report(ViolationKind::IllegalSyntax, Some(detail), Some(position_of(node)));
        }
    }

    fn visit_attribute(&mut self, node: Node<'t>, depth: usize) {
        if let Some(attr) = node.child_by_field_name("attribute") {
            let name = self.tree.text(attr);
            let position = position_of(attr);
            rules::check_reserved_name(&mut self.state, name, position);
            rules::check_runtime_token(&mut self.state, name, position);
        }
        if let Some(object) = node.child_by_field_name("object") {
            self.visit(object, depth + 1);
        }
    }

    fn visit_import(&mut self, node: Node<'t>) {
        let position = position_of(node);
        if self.state.function_depth > 0 {
            self.state
                .report(ViolationKind::NestedImport, None, Some(position));
        }

        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let (module, alias) = match SourceTree::kind(name) {
                NodeKind::AliasedImport => (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ),
                _ => (Some(name), None),
            };
            if let Some(module) = module {
                let dotted = self.tree.text(module);
                for segment in dotted.split('.') {
                    rules::check_reserved_name(&mut self.state, segment.trim(), position);
                }
                rules::check_imported_module(&mut self.state, dotted, position);
            }
            if let Some(alias) = alias {
                rules::check_name_reference(&mut self.state, self.tree.text(alias), position);
            }
        }
    }

    fn visit_import_from(&mut self, node: Node<'t>) {
        let position = position_of(node);
        self.state
            .report(ViolationKind::ImportFrom, None, Some(position));
        if self.state.function_depth > 0 {
            self.state
                .report(ViolationKind::NestedImport, None, Some(position));
        }
    }

    fn visit_class(&mut self, node: Node<'t>, depth: usize) {
        self.state
            .report(ViolationKind::ClassDefinition, None, Some(position_of(node)));
        if let Some(name) = node.child_by_field_name("name") {
            rules::check_reserved_name(&mut self.state, self.tree.text(name), position_of(name));
        }
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            self.visit(superclasses, depth + 1);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, depth + 1);
        }
    }

    fn visit_decorated(&mut self, node: Node<'t>, depth: usize) {
        let mut decorators = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if SourceTree::kind(child) == NodeKind::Decorator {
                decorators.push(child);
            }
        }

        match node.child_by_field_name("definition") {
            Some(def) if SourceTree::kind(def) == NodeKind::FunctionDefinition => {
                self.visit_function(def, &decorators, depth + 1);
            }
            Some(def) => {
                for decorator in &decorators {
                    self.visit(*decorator, depth + 1);
                }
                self.visit(def, depth + 1);
            }
            None => self.visit_children(node, depth),
        }
    }

    fn visit_function(&mut self, node: Node<'t>, decorators: &[Node<'t>], depth: usize) {
        let position = position_of(node);

        if rules::is_async(node) {
            self.state
                .report(ViolationKind::AsyncDefinition, None, Some(position));
            for decorator in decorators {
                self.visit(*decorator, depth + 1);
            }
            self.visit_signature(node, false, depth);
            self.visit_body(node, depth);
            return;
        }

        if let Some(body) = node.child_by_field_name("body") {
            for _ in rules::direct_function_defs(body) {
                self.state
                    .report(ViolationKind::NestedFunction, None, Some(position));
            }
        }

        let markers = rules::check_markers(self.tree, &mut self.state, decorators, position);
        let mut exported = false;
        for marker in markers {
            if marker == vocab::EXPORT_DECORATOR {
                self.state.has_export = true;
                exported = true;
            } else if marker == vocab::CONSTRUCT_DECORATOR {
                if self.state.constructor_seen {
                    self.state
                        .report(ViolationKind::DuplicateConstructor, None, Some(position));
                }
                self.state.constructor_seen = true;
            }
        }
        for decorator in decorators {
            self.visit(*decorator, depth + 1);
        }

        self.visit_signature(node, exported, depth);
        if exported {
            let returns = node
                .child_by_field_name("return_type")
                .map(|t| rules::annotation_name(self.tree, t));
            self.state.record_return_annotation(returns, position);
        }
        self.visit_body(node, depth);
    }

    /// Name, parameters and return type. Exported functions also have their
    /// arguments and annotations recorded for the post-traversal checks.
    fn visit_signature(&mut self, node: Node<'t>, exported: bool, depth: usize) {
        if let Some(name) = node.child_by_field_name("name") {
            rules::check_reserved_name(&mut self.state, self.tree.text(name), position_of(name));
        }

        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for child in params.named_children(&mut cursor) {
                match rules::parameter(child) {
                    Ok(None) => {}
                    Ok(Some(param)) => self.visit_parameter(param, exported, depth + 1),
                    Err(unsupported) => {
                        self.state.report(
                            ViolationKind::IllegalSyntax,
                            Some(unsupported.kind()),
                            Some(position_of(unsupported)),
                        );
                        self.visit(unsupported, depth + 2);
                    }
                }
            }
        }

        if let Some(returns) = node.child_by_field_name("return_type") {
            self.visit(returns, depth + 1);
        }
    }

    fn visit_parameter(&mut self, param: rules::Parameter<'t>, exported: bool, depth: usize) {
        let name = self.tree.text(param.name);
        let position = position_of(param.node);
        rules::check_reserved_name(&mut self.state, name, position_of(param.name));

        if exported {
            self.state.record_argument(name, position);
            let annotation = param.annotation.map(|t| rules::annotation_name(self.tree, t));
            self.state.record_arg_annotation(annotation, position);
        }

        if let Some(annotation) = param.annotation {
            self.visit(annotation, depth + 1);
        }
        if let Some(default) = param.default {
            self.visit(default, depth + 1);
        }
    }

    fn visit_body(&mut self, node: Node<'t>, depth: usize) {
        if let Some(body) = node.child_by_field_name("body") {
            self.state.function_depth += 1;
            self.visit(body, depth + 1);
            self.state.function_depth -= 1;
        }
    }

    fn visit_assignment(&mut self, node: Node<'t>, depth: usize) {
        let position = position_of(node);
        if node.child_by_field_name("type").is_some() {
            self.state.report(
                ViolationKind::IllegalSyntax,
                Some("annotated assignment"),
                Some(position),
            );
        }
        if let Some(right) = node.child_by_field_name("right") {
            self.check_storage_declaration(node, right, position);
        }
        self.visit_children(node, depth);
    }

    /// Storage primitives: bare references, foreign keywords, tuple targets,
    /// and recording of the declared name.
    fn check_storage_declaration(&mut self, node: Node<'t>, right: Node<'t>, position: Position) {
        let right_kind = SourceTree::kind(right);
        if right_kind == NodeKind::Identifier && vocab::is_declarable_storage(self.tree.text(right)) {
            self.state.report(
                ViolationKind::IllegalBuiltin,
                Some(self.tree.text(right)),
                Some(position),
            );
        }
        if right_kind.is_tuple_like() && self.contains_storage_call(right) {
            self.state
                .report(ViolationKind::StorageTupleTarget, None, Some(position));
        }

        match rules::storage_call(self.tree, right) {
            rules::StorageCall::Constructor(name) => {
                if vocab::is_declarable_storage(name) && rules::has_foreign_keyword(self.tree, right) {
                    self.state
                        .report(ViolationKind::ForeignStorageKeyword, Some(name), Some(position));
                }
                match node.child_by_field_name("left") {
                    Some(left) if SourceTree::kind(left).is_tuple_like() => {
                        self.state
                            .report(ViolationKind::StorageTupleTarget, None, Some(position));
                    }
                    Some(left) if SourceTree::kind(left) == NodeKind::Identifier => {
                        self.state.record_storage_name(self.tree.text(left));
                    }
                    _ => {}
                }
            }
            rules::StorageCall::UnrecognizedShape => {
                tracing::debug!(
                    line = position.line,
                    column = position.column,
                    "unrecognized callee shape in assignment, storage checks skipped"
                );
            }
            rules::StorageCall::NotACall | rules::StorageCall::OtherCall => {}
        }
    }

    fn contains_storage_call(&self, tuple: Node<'t>) -> bool {
        let mut cursor = tuple.walk();
        let found = tuple.named_children(&mut cursor).any(|item| {
            matches!(
                rules::storage_call(self.tree, item),
                rules::StorageCall::Constructor(_)
            )
        });
        found
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
