//! 式の解析

use crate::cst::Node;

use super::precedence::ASSIGNMENT;
use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析（内部実装）
    ///
    /// 代入を含むすべての式を受け付ける。
    pub(super) fn parse_expression_internal(&mut self) -> ParseResult<Node> {
        self.parse_expression_bp(ASSIGNMENT)
    }
}
