//! Foo Language Syntax Library
//!
//! This library turns Foo source text into a lossless concrete syntax tree.
//! Parsing never fails: malformed input ends up in `Error` nodes and the
//! tree reports the collected errors. Trees can be updated incrementally
//! after a text edit.
//!
//! ```
//! use foo_syntax::SyntaxTree;
//!
//! let tree = SyntaxTree::parse("let x = 1 + 2 * 3");
//! assert!(!tree.has_errors());
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(source_file (variable_decl x (binary 1 + (binary 2 * 3))))"
//! );
//! ```

pub mod config;
pub mod cst;
pub mod error;
pub mod incremental;
pub mod lexer;
pub mod line_index;
pub mod parser;
pub mod tree;

// Re-export commonly used types
pub use config::{Feature, GrammarProfile, ParserConfig};
pub use cst::{Element, ImportForm, Node, NodeBuilder, NodeKind, Span};
pub use error::{FooError, FooResult, LexError, ParseError, SchemaError, SyntaxError};
pub use incremental::{reparse, EditError, ReparseStats, TextEdit};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use line_index::{LineCol, LineIndex};
pub use parser::{ParseResult, Parser};
pub use tree::SyntaxTree;
