// リテラル式と基本的な式の解析
//
// 整数、浮動小数点数、文字列、ブール値、null、識別子、配列、オブジェクト、
// 括弧式、関数リテラル、マクロ呼び出しを解析する。

use crate::config::Feature;
use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// プライマリ式を解析
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Node> {
        let leaf_kind = match self.current_kind() {
            TokenKind::Integer => Some(NodeKind::IntegerLiteral),
            TokenKind::Float => Some(NodeKind::FloatLiteral),
            TokenKind::String => Some(NodeKind::StringLiteral),
            TokenKind::True | TokenKind::False => Some(NodeKind::BooleanLiteral),
            TokenKind::Null => Some(NodeKind::NullLiteral),
            TokenKind::Identifier => Some(NodeKind::Identifier),
            _ => None,
        };
        if let Some(kind) = leaf_kind {
            let token = self.advance();
            return self.leaf(kind, token);
        }

        match self.current_kind() {
            TokenKind::LeftParen => self.parse_parenthesized_expression(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Fn => self.parse_function_literal(),
            TokenKind::At => self.parse_macro_call(),
            _ => Err(self.error_expected(&["expression"])),
        }
    }

    /// 括弧式を解析: `(expr)`
    fn parse_parenthesized_expression(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Parenthesized);
        builder.token(self.expect(TokenKind::LeftParen)?);
        builder.field("expression", self.parse_expression_internal()?);
        builder.token(self.expect(TokenKind::RightParen)?);
        self.finish(builder)
    }

    /// 配列リテラルを解析: `[a, b, c]`
    fn parse_array_literal(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::ArrayLiteral);
        builder.token(self.expect(TokenKind::LeftBracket)?);
        self.parse_separated(
            &mut builder,
            "element",
            TokenKind::Comma,
            TokenKind::RightBracket,
            false,
            |p| p.parse_expression_internal(),
        )?;
        builder.token(self.expect(TokenKind::RightBracket)?);
        self.finish(builder)
    }

    /// オブジェクトリテラルを解析: `{key: value, "key": value}`
    fn parse_object_literal(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::ObjectLiteral);
        builder.token(self.expect(TokenKind::LeftBrace)?);
        self.parse_separated(
            &mut builder,
            "field",
            TokenKind::Comma,
            TokenKind::RightBrace,
            false,
            |p| p.parse_object_field(),
        )?;
        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    fn parse_object_field(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::ObjectField);
        let key = match self.current_kind() {
            TokenKind::Identifier => self.expect_identifier()?,
            TokenKind::String => self.expect_string()?,
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::Identifier.describe(),
                    TokenKind::String.describe(),
                ]));
            }
        };
        builder.field("key", key);
        builder.token(self.expect(TokenKind::Colon)?);
        builder.field("value", self.parse_expression_internal()?);
        self.finish(builder)
    }

    /// 関数リテラルを解析: `fn(params) => expr` または `fn(params) { ... }`
    fn parse_function_literal(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::FunctionLiteral);
        builder.token(self.expect(TokenKind::Fn)?);
        self.parse_parameter_list(&mut builder)?;

        if let Some(arrow) = self.match_token(TokenKind::FatArrow) {
            builder.token(arrow);
            builder.field("expression", self.parse_expression_internal()?);
        } else if self.check(TokenKind::LeftBrace) {
            builder.field("body", self.parse_block()?);
        } else {
            return Err(self.error_expected(&[
                TokenKind::FatArrow.describe(),
                TokenKind::LeftBrace.describe(),
            ]));
        }

        self.finish(builder)
    }

    /// マクロ呼び出しを解析: `@name(args)`
    fn parse_macro_call(&mut self) -> ParseResult<Node> {
        self.require(Feature::MacroCall)?;

        let mut builder = NodeBuilder::new(NodeKind::MacroCall);
        builder.token(self.expect(TokenKind::At)?);
        builder.field("name", self.expect_identifier()?);
        self.parse_argument_list(&mut builder)?;
        self.finish(builder)
    }
}
