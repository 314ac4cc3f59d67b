//! 後置式の解析
//!
//! 関数呼び出し、メンバーアクセス、添字アクセスを左から順に連鎖させる。

use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;
use crate::parser::precedence::is_postfix_operator;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// 後置式を解析
    pub(crate) fn parse_postfix_expression(&mut self) -> ParseResult<Node> {
        let expr = self.parse_primary_expression()?;

        self.chained(|p| {
            let mut expr = expr;
            while is_postfix_operator(p.current_kind()) {
                p.descend()?;
                expr = match p.current_kind() {
                    TokenKind::LeftParen => p.parse_call_expression(expr)?,
                    TokenKind::Dot => p.parse_member_expression(expr)?,
                    _ => p.parse_index_expression(expr)?,
                };
            }
            Ok(expr)
        })
    }

    /// 関数呼び出しを解析: `f(a, b)`
    fn parse_call_expression(&mut self, function: Node) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Call);
        builder.field("function", function);
        self.parse_argument_list(&mut builder)?;
        self.finish(builder)
    }

    /// 引数リストを解析: `(expr, ...)`
    pub(crate) fn parse_argument_list(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        builder.token(self.expect(TokenKind::LeftParen)?);
        self.parse_separated(
            builder,
            "argument",
            TokenKind::Comma,
            TokenKind::RightParen,
            false,
            |p| p.parse_expression_internal(),
        )?;
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(())
    }

    /// メンバーアクセスを解析: `obj.name`
    fn parse_member_expression(&mut self, object: Node) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Member);
        builder.field("object", object);
        builder.token(self.expect(TokenKind::Dot)?);
        builder.field("property", self.expect_identifier()?);
        self.finish(builder)
    }

    /// 添字アクセスを解析: `obj[index]`
    fn parse_index_expression(&mut self, object: Node) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Index);
        builder.field("object", object);
        builder.token(self.expect(TokenKind::LeftBracket)?);
        builder.field("index", self.parse_expression_internal()?);
        builder.token(self.expect(TokenKind::RightBracket)?);
        self.finish(builder)
    }
}
