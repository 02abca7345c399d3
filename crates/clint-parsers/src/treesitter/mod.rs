use tree_sitter::{Language, Node, Parser, Point, Tree};

use crate::kinds::NodeKind;

/// Parses candidate contract source with tree-sitter-python.
///
/// A `Parser` is not `Sync`; give each concurrent check its own instance.
pub struct ContractParser {
    parser: Parser,
}

impl ContractParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        let lang: Language = tree_sitter_python::LANGUAGE.into();
        parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        Ok(Self { parser })
    }

    /// Parse `source` into an owned tree. Source that tree-sitter had to
    /// recover from is reported as a syntax error at the first bad node.
    pub fn parse(&mut self, source: impl Into<String>) -> Result<SourceTree, ParseError> {
        let source = source.into();
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::Cancelled)?;

        if let Some(err) = syntax_error(tree.root_node()) {
            return Err(err);
        }
        Ok(SourceTree { source, tree })
    }
}

/// Parse with a fresh parser.
pub fn parse_source(source: &str) -> Result<SourceTree, ParseError> {
    ContractParser::new()?.parse(source)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse cancelled")]
    Cancelled,
    /// `line` and `column` are 0-based.
    #[error("{message} (line {line_no}, column {col_no})", line_no = .line + 1, col_no = .column + 1)]
    Syntax {
        message: String,
        line: u32,
        column: u32,
    },
}

/// A parsed candidate program. Owned by one check and only ever read.
pub struct SourceTree {
    source: String,
    tree: Tree,
}

impl SourceTree {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn text<'a>(&'a self, node: Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Kind of `node` in the closed enumeration.
    pub fn kind(node: Node<'_>) -> NodeKind {
        NodeKind::from_kind(node.kind())
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("bytes", &self.source.len())
            .field("root", &self.tree.root_node().kind())
            .finish()
    }
}

/// 0-based (line, column) of a node's first byte.
pub fn node_position(node: Node<'_>) -> (u32, u32) {
    let Point { row, column } = node.start_position();
    (row as u32, column as u32)
}

fn syntax_error(root: Node<'_>) -> Option<ParseError> {
    if !root.has_error() {
        return None;
    }
    let bad = first_bad_node(root);
    let (line, column) = bad.map(node_position).unwrap_or((0, 0));
    let message = match bad {
        Some(node) if node.is_missing() => format!("missing '{}'", node.kind()),
        _ => "invalid syntax".to_string(),
    };
    Some(ParseError::Syntax {
        message,
        line,
        column,
    })
}

/// Document-order search for the first ERROR or MISSING node. Iterative so
/// pathological nesting cannot exhaust the stack.
fn first_bad_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
