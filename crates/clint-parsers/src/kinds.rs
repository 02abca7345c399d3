//! Closed enumeration of tree-sitter-python node kinds.
//!
//! Anything the grammar produces that is not listed here maps to
//! [`NodeKind::Other`], which the rule engine rejects. New grammar releases
//! therefore cannot widen the accepted language by accident.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    Block,
    Comment,
    LineContinuation,

    // statements
    ExpressionStatement,
    Assignment,
    AugmentedAssignment,
    If,
    Elif,
    Else,
    For,
    While,
    Return,
    Pass,
    Break,
    Continue,
    Assert,
    Import,
    ImportFrom,
    FutureImport,
    DottedName,
    AliasedImport,
    FunctionDefinition,
    DecoratedDefinition,
    Decorator,
    ClassDefinition,

    // parameters
    Parameters,
    TypedParameter,
    DefaultParameter,
    TypedDefaultParameter,
    ListSplatPattern,
    DictionarySplatPattern,
    KeywordSeparator,
    PositionalSeparator,
    Type,

    // expressions
    Identifier,
    Attribute,
    Call,
    ArgumentList,
    KeywordArgument,
    BinaryOperator,
    UnaryOperator,
    NotOperator,
    BooleanOperator,
    Comparison,
    Conditional,
    Parenthesized,
    Subscript,
    Slice,
    List,
    Tuple,
    Set,
    Dictionary,
    Pair,
    ListComprehension,
    DictionaryComprehension,
    SetComprehension,
    ForInClause,
    IfClause,
    ListSplat,
    DictionarySplat,
    PatternList,
    ExpressionList,
    TuplePattern,
    ListPattern,

    // literals
    String,
    StringStart,
    StringContent,
    StringEnd,
    EscapeSequence,
    EscapeInterpolation,
    Interpolation,
    FormatSpecifier,
    TypeConversion,
    ConcatenatedString,
    Integer,
    Float,
    True,
    False,
    None,

    /// Any kind outside the recognized set.
    Other(&'static str),
}

impl NodeKind {
    pub fn from_kind(kind: &'static str) -> Self {
        match kind {
            "module" => NodeKind::Module,
            "block" => NodeKind::Block,
            "comment" => NodeKind::Comment,
            "line_continuation" => NodeKind::LineContinuation,

            "expression_statement" => NodeKind::ExpressionStatement,
            "assignment" => NodeKind::Assignment,
            "augmented_assignment" => NodeKind::AugmentedAssignment,
            "if_statement" => NodeKind::If,
            "elif_clause" => NodeKind::Elif,
            "else_clause" => NodeKind::Else,
            "for_statement" => NodeKind::For,
            "while_statement" => NodeKind::While,
            "return_statement" => NodeKind::Return,
            "pass_statement" => NodeKind::Pass,
            "break_statement" => NodeKind::Break,
            "continue_statement" => NodeKind::Continue,
            "assert_statement" => NodeKind::Assert,
            "import_statement" => NodeKind::Import,
            "import_from_statement" => NodeKind::ImportFrom,
            "future_import_statement" => NodeKind::FutureImport,
            "dotted_name" => NodeKind::DottedName,
            "aliased_import" => NodeKind::AliasedImport,
            "function_definition" => NodeKind::FunctionDefinition,
            "decorated_definition" => NodeKind::DecoratedDefinition,
            "decorator" => NodeKind::Decorator,
            "class_definition" => NodeKind::ClassDefinition,

            "parameters" => NodeKind::Parameters,
            "typed_parameter" => NodeKind::TypedParameter,
            "default_parameter" => NodeKind::DefaultParameter,
            "typed_default_parameter" => NodeKind::TypedDefaultParameter,
            "list_splat_pattern" => NodeKind::ListSplatPattern,
            "dictionary_splat_pattern" => NodeKind::DictionarySplatPattern,
            "keyword_separator" => NodeKind::KeywordSeparator,
            "positional_separator" => NodeKind::PositionalSeparator,
            "type" => NodeKind::Type,

            "identifier" => NodeKind::Identifier,
            "attribute" => NodeKind::Attribute,
            "call" => NodeKind::Call,
            "argument_list" => NodeKind::ArgumentList,
            "keyword_argument" => NodeKind::KeywordArgument,
            "binary_operator" => NodeKind::BinaryOperator,
            "unary_operator" => NodeKind::UnaryOperator,
            "not_operator" => NodeKind::NotOperator,
            "boolean_operator" => NodeKind::BooleanOperator,
            "comparison_operator" => NodeKind::Comparison,
            "conditional_expression" => NodeKind::Conditional,
            "parenthesized_expression" => NodeKind::Parenthesized,
            "subscript" => NodeKind::Subscript,
            "slice" => NodeKind::Slice,
            "list" => NodeKind::List,
            "tuple" => NodeKind::Tuple,
            "set" => NodeKind::Set,
            "dictionary" => NodeKind::Dictionary,
            "pair" => NodeKind::Pair,
            "list_comprehension" => NodeKind::ListComprehension,
            "dictionary_comprehension" => NodeKind::DictionaryComprehension,
            "set_comprehension" => NodeKind::SetComprehension,
            "for_in_clause" => NodeKind::ForInClause,
            "if_clause" => NodeKind::IfClause,
            "list_splat" => NodeKind::ListSplat,
            "dictionary_splat" => NodeKind::DictionarySplat,
            "pattern_list" => NodeKind::PatternList,
            "expression_list" => NodeKind::ExpressionList,
            "tuple_pattern" => NodeKind::TuplePattern,
            "list_pattern" => NodeKind::ListPattern,

            "string" => NodeKind::String,
            "string_start" => NodeKind::StringStart,
            "string_content" => NodeKind::StringContent,
            "string_end" => NodeKind::StringEnd,
            "escape_sequence" => NodeKind::EscapeSequence,
            "escape_interpolation" => NodeKind::EscapeInterpolation,
            "interpolation" => NodeKind::Interpolation,
            "format_specifier" => NodeKind::FormatSpecifier,
            "type_conversion" => NodeKind::TypeConversion,
            "concatenated_string" => NodeKind::ConcatenatedString,
            "integer" => NodeKind::Integer,
            "float" => NodeKind::Float,
            "true" => NodeKind::True,
            "false" => NodeKind::False,
            "none" => NodeKind::None,

            other => NodeKind::Other(other),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, NodeKind::Other(_))
    }

    /// Kinds that are tuple-shaped on either side of an assignment.
    pub fn is_tuple_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Tuple
                | NodeKind::TuplePattern
                | NodeKind::PatternList
                | NodeKind::ExpressionList
                | NodeKind::ListPattern
        )
    }
}

impl From<&'static str> for NodeKind {
    fn from(kind: &'static str) -> Self {
        NodeKind::from_kind(kind)
    }
}
