//! A parsed source file: the CST root together with its text.

use std::fs;
use std::path::Path;

use crate::config::ParserConfig;
use crate::cst::Node;
use crate::error::{FooResult, SyntaxError};
use crate::incremental::{self, EditError, ReparseStats, TextEdit};
use crate::line_index::LineIndex;
use crate::parser::Parser;

/// Syntax tree of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: Node,
    source: String,
    config: ParserConfig,
}

impl SyntaxTree {
    /// Parse with the default configuration
    pub fn parse(source: impl Into<String>) -> Self {
        Self::parse_with(source, ParserConfig::default())
    }

    pub fn parse_with(source: impl Into<String>, config: ParserConfig) -> Self {
        let source = source.into();
        let root = Parser::new(&source, config).parse();
        log::debug!(
            "parsed {} bytes into {} top-level statements",
            source.len(),
            root.child_nodes().count()
        );
        Self::from_parts(root, source, config)
    }

    /// Read and parse a file
    pub fn from_file(path: impl AsRef<Path>, config: ParserConfig) -> FooResult<Self> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        let source = fs::read_to_string(path)?;
        Ok(Self::parse_with(source, config))
    }

    pub(crate) fn from_parts(root: Node, source: String, config: ParserConfig) -> Self {
        Self {
            root,
            source,
            config,
        }
    }

    /// The `SourceFile` node
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Lexical and syntax errors in source order
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.root.errors()
    }

    pub fn has_errors(&self) -> bool {
        self.root.descendants().any(Node::is_error)
            || self
                .root
                .tokens()
                .any(|token| token.kind == crate::lexer::TokenKind::Error)
    }

    /// Source text rebuilt from the tree
    pub fn text(&self) -> String {
        self.root.text()
    }

    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }

    pub fn line_index(&self) -> LineIndex<'_> {
        LineIndex::new(&self.source)
    }

    /// Apply `edit` and reparse, reusing unaffected statements.
    ///
    /// See [`incremental::reparse`].
    pub fn reparse(&self, edit: &TextEdit) -> Result<(SyntaxTree, ReparseStats), EditError> {
        incremental::reparse(self, edit, self.config)
    }
}
