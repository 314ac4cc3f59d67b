//! Concrete syntax tree for the Foo language.
//!
//! A [`Node`] owns its children (tokens and nodes) in source order and keeps
//! a name index over them, so both "walk everything" and "give me the
//! `condition` of this `if`" are cheap. Trivia lives on the tokens, which
//! makes the tree a lossless image of the source.

mod builder;
mod kind;
mod render;

pub use builder::NodeBuilder;
pub use kind::{Arity, Constraint, FieldName, FieldRule, NodeFamily, NodeKind, Schema};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};

/// Span information for source location tracking (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Move the span by `delta` bytes
    pub fn shifted(self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
        }
    }

    pub fn to(self, other: Span) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A child of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Node(Node),
    Token(Token),
}

impl Element {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Element::Token(token) => Some(token),
            Element::Node(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Element::Node(node) => node.span,
            Element::Token(token) => token.span,
        }
    }

    fn shift(&mut self, delta: isize) {
        match self {
            Element::Node(node) => node.shift(delta),
            Element::Token(token) => token.shift(delta),
        }
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

impl From<Token> for Element {
    fn from(token: Token) -> Self {
        Element::Token(token)
    }
}

/// A node of the concrete syntax tree
///
/// Nodes are immutable once built; see [`NodeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    children: Vec<Element>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    fields: IndexMap<FieldName, Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Box<SyntaxError>>,
}

/// The three shapes of an import statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportForm {
    /// `import "path"`
    Bare,
    /// `import { a, b } from "path"`
    Destructured,
    /// `import * as alias from "path"`
    Wildcard,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Span from the first to the last token, excluding leading trivia
    pub fn span(&self) -> Span {
        self.span
    }

    /// Children in source order, including unnamed punctuation
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().filter_map(Element::as_node)
    }

    /// The first element stored under `name`
    pub fn field(&self, name: &str) -> Option<&Element> {
        self.fields
            .get(name)
            .and_then(|indices| indices.first())
            .map(|&index| &self.children[index])
    }

    /// All elements stored under `name`, in source order
    pub fn field_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> + 'a {
        self.fields
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&index| &self.children[index])
    }

    pub fn field_node(&self, name: &str) -> Option<&Node> {
        self.field(name).and_then(Element::as_node)
    }

    pub fn field_token(&self, name: &str) -> Option<&Token> {
        self.field(name).and_then(Element::as_token)
    }

    pub fn field_nodes<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.field_all(name).filter_map(Element::as_node)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of the fields present on this node, in first-use order
    pub fn field_names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.keys().copied()
    }

    /// Name of the field holding the child at `index`, if any
    pub fn field_of(&self, index: usize) -> Option<FieldName> {
        self.fields
            .iter()
            .find(|(_, indices)| indices.contains(&index))
            .map(|(name, _)| *name)
    }

    /// The error record of an Error node
    pub fn error(&self) -> Option<&SyntaxError> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.kind == NodeKind::Error
    }

    /// Pre-order walk over this node and all descendant nodes
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All tokens under this node in source order
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            stack: vec![self.children.iter()],
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn first_token(&self) -> Option<&Token> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<&Token> {
        let mut stack: Vec<std::iter::Rev<std::slice::Iter<'_, Element>>> =
            vec![self.children.iter().rev()];
        loop {
            let top = stack.last_mut()?;
            match top.next() {
                Some(Element::Token(token)) => return Some(token),
                Some(Element::Node(node)) => stack.push(node.children.iter().rev()),
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Text of the node, including the trivia in front of each of its tokens.
    ///
    /// For the root this reproduces the parsed source exactly.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            token.render(&mut out);
        }
        out
    }

    /// Errors recorded in this subtree, in source order.
    ///
    /// Lexical errors come from Error tokens, parse errors from Error nodes.
    pub fn errors(&self) -> Vec<SyntaxError> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        errors.sort_by_key(SyntaxError::offset);
        // A parse error reported at a bad character duplicates its lex error
        errors.dedup();
        errors
    }

    fn collect_errors(&self, errors: &mut Vec<SyntaxError>) {
        if let Some(error) = &self.error {
            errors.push(error.as_ref().clone());
        }
        for child in &self.children {
            match child {
                Element::Node(node) => node.collect_errors(errors),
                Element::Token(token) if token.kind == TokenKind::Error => {
                    errors.push(SyntaxError::lex(token));
                }
                Element::Token(_) => {}
            }
        }
    }

    /// Shape of an Import node
    pub fn import_form(&self) -> Option<ImportForm> {
        if self.kind != NodeKind::Import {
            return None;
        }
        let form = if self.has_field("alias") {
            ImportForm::Wildcard
        } else if self.has_field("name") {
            ImportForm::Destructured
        } else {
            ImportForm::Bare
        };
        Some(form)
    }

    /// Copy of the node moved by `delta` bytes
    pub(crate) fn shifted(&self, delta: isize) -> Node {
        let mut node = self.clone();
        node.shift(delta);
        node
    }

    fn shift(&mut self, delta: isize) {
        self.span = self.span.shifted(delta);
        for child in &mut self.children {
            child.shift(delta);
        }
        if let Some(error) = &mut self.error {
            error.shift(delta);
        }
    }
}

/// Iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().filter_map(Element::as_node));
        Some(node)
    }
}

/// Iterator returned by [`Node::tokens`]
pub struct Tokens<'a> {
    stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Element::Token(token)) => return Some(token),
                Some(Element::Node(node)) => self.stack.push(node.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
