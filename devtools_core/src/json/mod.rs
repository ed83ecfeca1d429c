//! Permissive JSON tooling: an error-tolerant syntax tree for JSON5 and
//! Mongo shell style documents, a reformatter built on it, and strict
//! serde_json formatting.

mod lexer;
pub mod reformat;
pub mod strict;
pub mod syntax;

pub use reformat::{Indentation, ReformatConfig, reformat, reformat_with};
pub use strict::JsonError;
pub use syntax::{NodeKind, Span, SyntaxNode, SyntaxTree, parse};
