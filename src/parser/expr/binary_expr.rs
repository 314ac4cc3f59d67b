//! 二項演算式の解析
//!
//! 演算子の優先順位表（`precedence`）に従って、優先順位上昇法で
//! 二項演算・三項演算・代入を解析する。

use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;
use crate::parser::precedence::{infix_operator, ASSIGNMENT, TERNARY};
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// 優先順位が `min_power` 以上の演算子だけを取り込んで式を解析
    pub(crate) fn parse_expression_bp(&mut self, min_power: u8) -> ParseResult<Node> {
        self.nested(|p| {
            let left = p.parse_prefix_expression()?;
            p.chained(|p| p.parse_infix_chain(left, min_power))
        })
    }

    /// `left` に続く二項演算子を左から順に取り込む
    fn parse_infix_chain(&mut self, mut left: Node, min_power: u8) -> ParseResult<Node> {
        while let Some(info) = infix_operator(self.current_kind()) {
            if info.power < min_power {
                break;
            }
            self.descend()?;

            left = match info.node {
                NodeKind::Ternary => self.parse_ternary_rest(left)?,
                kind => {
                    let mut builder = NodeBuilder::new(kind);
                    builder.field("left", left);
                    builder.field("operator", self.advance());
                    builder.field("right", self.parse_expression_bp(info.right_power())?);
                    self.finish(builder)?
                }
            };
        }

        Ok(left)
    }

    /// 三項演算子の `? consequence : alternative` 部分を解析
    ///
    /// 中央の式は代入を含む完全な式、右側は右結合。
    fn parse_ternary_rest(&mut self, condition: Node) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Ternary);
        builder.field("condition", condition);
        builder.token(self.expect(TokenKind::Question)?);
        builder.field("consequence", self.parse_expression_bp(ASSIGNMENT)?);
        builder.token(self.expect(TokenKind::Colon)?);
        builder.field("alternative", self.parse_expression_bp(TERNARY)?);
        self.finish(builder)
    }
}
