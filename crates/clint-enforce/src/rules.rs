//! Individual rules and the tree-shape helpers they rely on.
//!
//! The walker in [`crate::engine`] decides *where* each rule applies; the
//! functions here decide *what* is a violation.

use clint_core::catalog::ViolationKind;
use clint_core::types::Position;
use clint_core::vocab;
use clint_parsers::treesitter::node_position;
use clint_parsers::{NodeKind, SourceTree};
use tree_sitter::Node;

use crate::state::RuleState;

pub fn position_of(node: Node<'_>) -> Position {
    let (line, column) = node_position(node);
    Position::new(line, column)
}

/// Rule 1: names starting or ending with `_` belong to the runtime.
pub fn check_reserved_name(state: &mut RuleState, name: &str, position: Position) {
    if vocab::is_reserved_name(name) {
        state.report(ViolationKind::ReservedName, Some(name), Some(position));
    }
}

/// Rules 1, 8 and 9 for a name in expression position.
pub fn check_name_reference(state: &mut RuleState, name: &str, position: Position) {
    check_reserved_name(state, name, position);
    check_runtime_token(state, name, position);
    if vocab::is_illegal_builtin(name) {
        state.report(ViolationKind::IllegalBuiltin, Some(name), Some(position));
    }
}

/// Rule 9: the runtime accessor is off limits everywhere.
pub fn check_runtime_token(state: &mut RuleState, name: &str, position: Position) {
    if name == vocab::RUNTIME_TOKEN {
        state.report(ViolationKind::RuntimeAccess, Some(name), Some(position));
    }
}

/// Rule 8 for `import x`: stdlib and builtin modules are never importable.
pub fn check_imported_module(state: &mut RuleState, module: &str, position: Position) {
    if vocab::is_stdlib_module(module) {
        state.report(ViolationKind::IllegalBuiltin, Some(module), Some(position));
    }
}

/// True for `async def`, `async for` and `async with`.
pub fn is_async(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "async");
    found
}

/// `a.b.c` as a string when `node` is an identifier or a chain of
/// attribute accesses on identifiers.
pub fn dotted_path(tree: &SourceTree, node: Node<'_>) -> Option<String> {
    match SourceTree::kind(node) {
        NodeKind::Identifier => Some(tree.text(node).to_string()),
        NodeKind::Attribute => {
            let object = node.child_by_field_name("object")?;
            let attr = node.child_by_field_name("attribute")?;
            let base = dotted_path(tree, object)?;
            Some(format!("{base}.{}", tree.text(attr)))
        }
        _ => None,
    }
}

/// Resolved name of a declared annotation (`type` node). Dotted forms keep
/// their dots; anything else is reported by its source text.
pub fn annotation_name(tree: &SourceTree, type_node: Node<'_>) -> String {
    let expr = if SourceTree::kind(type_node) == NodeKind::Type {
        type_node.named_child(0).unwrap_or(type_node)
    } else {
        type_node
    };
    dotted_path(tree, expr).unwrap_or_else(|| tree.text(type_node).trim().to_string())
}

/// How a decorator names its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'a> {
    /// `@name` or `@name(...)`.
    Simple(&'a str),
    /// Any other expression.
    Unrecognized,
}

pub fn decorator_marker<'a>(tree: &'a SourceTree, decorator: Node<'a>) -> Marker<'a> {
    let Some(expr) = first_non_comment(decorator) else {
        return Marker::Unrecognized;
    };
    match SourceTree::kind(expr) {
        NodeKind::Identifier => Marker::Simple(tree.text(expr)),
        NodeKind::Call => match expr.child_by_field_name("function") {
            Some(f) if SourceTree::kind(f) == NodeKind::Identifier => Marker::Simple(tree.text(f)),
            _ => Marker::Unrecognized,
        },
        _ => Marker::Unrecognized,
    }
}

/// Expression carried by a decorator node.
pub fn first_non_comment(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| SourceTree::kind(*c) != NodeKind::Comment);
    found
}

/// Rule 10: at most one marker, each simple and drawn from the valid set.
/// Returns the resolved marker names in order.
pub fn check_markers<'a>(
    tree: &'a SourceTree,
    state: &mut RuleState,
    decorators: &[Node<'a>],
    position: Position,
) -> Vec<&'a str> {
    if decorators.len() > 1 {
        let detail = format!("Detected: {} MAX limit: 1", decorators.len());
        state.report(ViolationKind::MultipleDecorators, Some(&detail), Some(position));
    }

    let mut names = Vec::new();
    for decorator in decorators {
        match decorator_marker(tree, *decorator) {
            Marker::Unrecognized => {
                state.report(
                    ViolationKind::InvalidDecorator,
                    Some("unrecognized decorator form"),
                    Some(position),
                );
            }
            Marker::Simple(name) => {
                if !vocab::is_valid_decorator(name) {
                    let detail = format!(
                        "Invalid decorator '{}'. Valid list: {}",
                        name,
                        vocab::VALID_DECORATORS.join(", ")
                    );
                    state.report(ViolationKind::InvalidDecorator, Some(&detail), Some(position));
                }
                names.push(name);
            }
        }
    }
    names
}

/// A parameter that binds a name.
#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    pub node: Node<'a>,
    pub name: Node<'a>,
    pub annotation: Option<Node<'a>>,
    pub default: Option<Node<'a>>,
}

/// Destructure one child of a `parameters` node. `None` for separators and
/// comments, `Err` for shapes outside the accepted grammar.
pub fn parameter<'a>(node: Node<'a>) -> Result<Option<Parameter<'a>>, Node<'a>> {
    let kind = SourceTree::kind(node);
    let binding = match kind {
        NodeKind::KeywordSeparator | NodeKind::PositionalSeparator | NodeKind::Comment => {
            return Ok(None)
        }
        NodeKind::Identifier => Some(Parameter {
            node,
            name: node,
            annotation: None,
            default: None,
        }),
        NodeKind::ListSplatPattern | NodeKind::DictionarySplatPattern => {
            splat_name(node).map(|name| Parameter {
                node,
                name,
                annotation: None,
                default: None,
            })
        }
        NodeKind::TypedParameter => node.named_child(0).and_then(|inner| {
            let name = match SourceTree::kind(inner) {
                NodeKind::Identifier => Some(inner),
                NodeKind::ListSplatPattern | NodeKind::DictionarySplatPattern => splat_name(inner),
                _ => None,
            }?;
            Some(Parameter {
                node,
                name,
                annotation: node.child_by_field_name("type"),
                default: None,
            })
        }),
        NodeKind::DefaultParameter | NodeKind::TypedDefaultParameter => node
            .child_by_field_name("name")
            .filter(|n| SourceTree::kind(*n) == NodeKind::Identifier)
            .map(|name| Parameter {
                node,
                name,
                annotation: node.child_by_field_name("type"),
                default: node.child_by_field_name("value"),
            }),
        _ => None,
    };
    binding.map(Some).ok_or(node)
}

fn splat_name(node: Node<'_>) -> Option<Node<'_>> {
    node.named_child(0)
        .filter(|n| SourceTree::kind(*n) == NodeKind::Identifier)
}

/// What the right-hand side of an assignment says about storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCall<'a> {
    /// Not a call at all.
    NotACall,
    /// A call to a storage constructor, by simple name.
    Constructor(&'a str),
    /// A call to some other simple name, or to an attribute.
    OtherCall,
    /// A call whose callee is neither a name nor an attribute.
    UnrecognizedShape,
}

pub fn storage_call<'a>(tree: &'a SourceTree, value: Node<'a>) -> StorageCall<'a> {
    if SourceTree::kind(value) != NodeKind::Call {
        return StorageCall::NotACall;
    }
    let Some(callee) = value.child_by_field_name("function") else {
        return StorageCall::UnrecognizedShape;
    };
    match SourceTree::kind(callee) {
        NodeKind::Identifier => {
            let name = tree.text(callee);
            if vocab::is_storage_constructor(name) {
                StorageCall::Constructor(name)
            } else {
                StorageCall::OtherCall
            }
        }
        NodeKind::Attribute => StorageCall::OtherCall,
        _ => StorageCall::UnrecognizedShape,
    }
}

/// True if the call passes `contract=` or `name=`.
pub fn has_foreign_keyword(tree: &SourceTree, call: Node<'_>) -> bool {
    let Some(args) = call.child_by_field_name("arguments") else {
        return false;
    };
    let mut cursor = args.walk();
    let found = args.named_children(&mut cursor).any(|arg| {
        SourceTree::kind(arg) == NodeKind::KeywordArgument
            && arg
                .child_by_field_name("name")
                .map(|n| vocab::FOREIGN_STORAGE_KEYWORDS.contains(&tree.text(n)))
                .unwrap_or(false)
    });
    found
}

/// Function definitions that sit directly in `body`, decorated or not.
pub fn direct_function_defs(body: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter_map(|stmt| match SourceTree::kind(stmt) {
            NodeKind::FunctionDefinition => Some(stmt),
            NodeKind::DecoratedDefinition => stmt
                .child_by_field_name("definition")
                .filter(|d| SourceTree::kind(*d) == NodeKind::FunctionDefinition),
            _ => None,
        })
        .collect()
}
