//! 文の解析

use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// 文を解析（末尾の `;` を含む）
    pub(super) fn parse_statement(&mut self) -> ParseResult<Node> {
        self.nested(|p| {
            log::trace!("statement at {}", p.current_token().span.start);
            let statement = p.parse_statement_inner()?;
            p.with_semicolon(statement)
        })
    }

    /// 先頭のトークンで文の種類を振り分ける
    fn parse_statement_inner(&mut self) -> ParseResult<Node> {
        match self.current_kind() {
            TokenKind::Let
            | TokenKind::Const
            | TokenKind::Struct
            | TokenKind::Enum
            | TokenKind::Interface
            | TokenKind::Impl
            | TokenKind::Extension
            | TokenKind::Macro
            | TokenKind::Import
            | TokenKind::Export => self.parse_declaration(),
            TokenKind::Fn if self.peek_kind(1) == TokenKind::Identifier => self.parse_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Match => self.parse_match_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Yield => self.parse_yield_statement(),
            TokenKind::Break => self.parse_break_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// 任意の `;` を文の末尾に追加
    fn with_semicolon(&mut self, statement: Node) -> ParseResult<Node> {
        match self.match_token(TokenKind::Semicolon) {
            Some(semicolon) => {
                let mut builder = NodeBuilder::resume(statement);
                builder.token(semicolon);
                self.finish(builder)
            }
            None => Ok(statement),
        }
    }

    /// ブロックを解析: `{ statement* }`
    pub(super) fn parse_block(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Block);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            builder.field("statement", self.parse_statement_or_recover(true));
        }

        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    /// 式文を解析
    fn parse_expression_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::ExpressionStatement);
        builder.field("expression", self.parse_expression_internal()?);
        self.finish(builder)
    }

    /// if文を解析: `if cond { ... } [else (block | if ...)]`
    pub(super) fn parse_if_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::If);
        builder.token(self.expect(TokenKind::If)?);
        builder.field("condition", self.parse_expression_internal()?);
        builder.field("then", self.parse_block()?);

        if let Some(else_token) = self.match_token(TokenKind::Else) {
            builder.token(else_token);
            let alternative = if self.check(TokenKind::If) {
                self.nested(|p| p.parse_if_statement())?
            } else {
                self.parse_block()?
            };
            builder.field("else", alternative);
        }

        self.finish(builder)
    }

    /// for文を解析
    ///
    /// 最初の節の後に `;` が続く場合のみC言語形式
    /// `for init; cond; update { ... }` として扱う。
    fn parse_for_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::For);
        builder.token(self.expect(TokenKind::For)?);

        let first = if self.check(TokenKind::Let) {
            let declaration = self.parse_variable_decl()?;
            if !self.check(TokenKind::Semicolon) {
                return Err(self.error_expected(&[TokenKind::Semicolon.describe()]));
            }
            declaration
        } else {
            self.parse_expression_internal()?
        };

        if let Some(semicolon) = self.match_token(TokenKind::Semicolon) {
            builder.field("init", first);
            builder.token(semicolon);
            builder.field("condition", self.parse_expression_internal()?);
            builder.token(self.expect(TokenKind::Semicolon)?);
            builder.field("update", self.parse_expression_internal()?);
        } else {
            builder.field("iterator", first);
        }

        builder.field("body", self.parse_block()?);
        self.finish(builder)
    }

    /// match文を解析: `match value { pattern => body, ... }`
    pub(super) fn parse_match_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Match);
        builder.token(self.expect(TokenKind::Match)?);
        builder.field("value", self.parse_expression_internal()?);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let arm = self.nested(|p| p.parse_match_arm())?;
            builder.field("arm", arm);
        }

        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    /// matchの腕を解析。パターンは一般の式として解析する
    fn parse_match_arm(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::MatchArm);
        builder.field("pattern", self.parse_expression_internal()?);
        builder.token(self.expect(TokenKind::FatArrow)?);

        let body = if self.check(TokenKind::LeftBrace) {
            self.parse_block()?
        } else {
            self.parse_expression_internal()?
        };
        builder.field("body", body);

        if let Some(comma) = self.match_token(TokenKind::Comma) {
            builder.token(comma);
        }
        self.finish(builder)
    }

    /// return文を解析: `return [expr, ...]`
    fn parse_return_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Return);
        builder.token(self.expect(TokenKind::Return)?);

        if self.starts_value() {
            builder.field("value", self.parse_expression_internal()?);
            while let Some(comma) = self.match_token(TokenKind::Comma) {
                builder.token(comma);
                builder.field("value", self.parse_expression_internal()?);
            }
        }

        self.finish(builder)
    }

    /// 現在のトークンが `return` の値を開始するか
    ///
    /// `fn name` は関数宣言なので値にならない。
    fn starts_value(&self) -> bool {
        let kind = self.current_kind();
        kind.starts_expression()
            && !(kind == TokenKind::Fn && self.peek_kind(1) == TokenKind::Identifier)
    }

    /// yield文を解析
    fn parse_yield_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Yield);
        builder.token(self.expect(TokenKind::Yield)?);
        builder.field("value", self.parse_expression_internal()?);
        self.finish(builder)
    }

    /// break文を解析
    fn parse_break_statement(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Break);
        builder.token(self.expect(TokenKind::Break)?);
        self.finish(builder)
    }
}
