//! Tree-sitter parsing of candidate contracts.
//!
//! - [`treesitter`]: `ContractParser` and the owned `SourceTree` it produces
//! - [`kinds`]: the closed set of node kinds the rule engine recognizes

pub mod kinds;
pub mod treesitter;

pub use kinds::NodeKind;
pub use treesitter::{ContractParser, ParseError, SourceTree};
