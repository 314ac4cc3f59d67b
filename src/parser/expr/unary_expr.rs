//! 単項演算式の解析
//!
//! 前置演算子 `! - ++ --` と `async` / `await` は、被演算子を単項演算子の
//! 優先順位で解析する。`-a.b` は `Unary(-, Member(a, b))`、
//! `await a + b` は `Binary(Await(a), +, b)` になる。

use crate::config::Feature;
use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;
use crate::parser::precedence::{is_prefix_operator, PREFIX};
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// 前置式を解析
    pub(crate) fn parse_prefix_expression(&mut self) -> ParseResult<Node> {
        let kind = self.current_kind();

        if is_prefix_operator(kind) {
            let mut builder = NodeBuilder::new(NodeKind::Unary);
            builder.field("operator", self.advance());
            builder.field("operand", self.parse_expression_bp(PREFIX)?);
            return self.finish(builder);
        }

        match kind {
            TokenKind::Async => self.parse_keyword_prefix(NodeKind::Async, Feature::Async),
            TokenKind::Await => self.parse_keyword_prefix(NodeKind::Await, Feature::Await),
            _ => self.parse_postfix_expression(),
        }
    }

    /// `async expr` / `await expr`
    fn parse_keyword_prefix(&mut self, kind: NodeKind, feature: Feature) -> ParseResult<Node> {
        self.require(feature)?;

        let mut builder = NodeBuilder::new(kind);
        builder.token(self.advance());
        builder.field("operand", self.parse_expression_bp(PREFIX)?);
        self.finish(builder)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserConfig;
    use crate::parser::Parser;

    fn sexp(source: &str) -> String {
        let mut parser = Parser::new(source, ParserConfig::default());
        parser.parse_expression().unwrap().to_sexp()
    }

    #[test]
    fn test_unary_operand_includes_postfix() {
        assert_eq!(sexp("-a.b"), "(unary - (member a b))");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        assert_eq!(sexp("!a && b"), "(binary (unary ! a) && b)");
    }

    #[test]
    fn test_await_binds_at_unary_power() {
        assert_eq!(sexp("await a + b"), "(binary (await a) + b)");
        assert_eq!(sexp("async f()"), "(async (call f))");
    }
}
