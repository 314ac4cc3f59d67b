//! 型の解析
//!
//! ```text
//! type     := optional ('|' optional)*
//! optional := primary '?'*
//! primary  := int | float | string | bool | Identifier | '(' type (',' type)* ')'
//! ```
//!
//! `?` は `|` より強く結合する: `A | B?` は `Union(A, Optional(B))`。

use crate::config::Feature;
use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// 型を解析
    pub(super) fn parse_type(&mut self) -> ParseResult<Node> {
        self.nested(|p| {
            let first = p.parse_optional_type()?;
            if !p.check(TokenKind::Pipe) {
                return Ok(first);
            }

            p.require(Feature::UnionType)?;
            let mut builder = NodeBuilder::new(NodeKind::Union);
            builder.field("variant", first);
            while let Some(pipe) = p.match_token(TokenKind::Pipe) {
                builder.token(pipe);
                builder.field("variant", p.parse_optional_type()?);
            }
            p.finish(builder)
        })
    }

    /// `?` を後置した型を解析
    fn parse_optional_type(&mut self) -> ParseResult<Node> {
        let inner = self.parse_primary_type()?;

        self.chained(|p| {
            let mut inner = inner;
            while p.check(TokenKind::Question) {
                p.require(Feature::OptionalType)?;
                p.descend()?;
                let mut builder = NodeBuilder::new(NodeKind::Optional);
                builder.field("inner", inner);
                builder.token(p.advance());
                inner = p.finish(builder)?;
            }
            Ok(inner)
        })
    }

    fn parse_primary_type(&mut self) -> ParseResult<Node> {
        let kind = self.current_kind();
        if kind.is_primitive_type() {
            let token = self.advance();
            return self.leaf(NodeKind::Primitive, token);
        }

        match kind {
            TokenKind::Identifier => self.parse_named_type(),
            TokenKind::LeftParen => self.parse_tuple_type(),
            _ => Err(self.error_expected(&["type"])),
        }
    }

    /// 名前付きの型
    pub(super) fn parse_named_type(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::Identifier)?;
        self.leaf(NodeKind::NamedType, token)
    }

    /// タプル型を解析: `(A, B, ...)`
    fn parse_tuple_type(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Tuple);
        builder.token(self.expect(TokenKind::LeftParen)?);
        self.parse_separated(
            &mut builder,
            "element",
            TokenKind::Comma,
            TokenKind::RightParen,
            true,
            |p| p.parse_type(),
        )?;
        builder.token(self.expect(TokenKind::RightParen)?);
        self.finish(builder)
    }
}
