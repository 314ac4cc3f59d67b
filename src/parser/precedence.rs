//! 演算子の優先順位表
//!
//! 数値が大きいほど強く結合する。同じ優先順位の演算子は
//! `Associativity` に従って結合する。

use crate::cst::NodeKind;
use crate::lexer::TokenKind;

/// 後置演算（呼び出し・メンバー・添字）
pub const POSTFIX: u8 = 15;
/// 前置単項演算子と `async` / `await` の被演算子
pub const PREFIX: u8 = 12;
pub const MULTIPLICATIVE: u8 = 11;
pub const ADDITIVE: u8 = 10;
pub const RELATIONAL: u8 = 8;
pub const EQUALITY: u8 = 7;
pub const LOGICAL_AND: u8 = 4;
pub const LOGICAL_OR: u8 = 3;
/// 三項演算子 `?:`
pub const TERNARY: u8 = 2;
/// 代入演算子
pub const ASSIGNMENT: u8 = 1;

/// 結合方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// 中置演算子の情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub power: u8,
    pub associativity: Associativity,
    /// 生成するノードの種類
    pub node: NodeKind,
}

impl OperatorInfo {
    const fn left(power: u8) -> Self {
        Self {
            power,
            associativity: Associativity::Left,
            node: NodeKind::Binary,
        }
    }

    /// 右辺を解析するときの最小優先順位
    pub fn right_power(self) -> u8 {
        match self.associativity {
            Associativity::Left => self.power + 1,
            Associativity::Right => self.power,
        }
    }
}

/// 中置演算子の優先順位を取得
pub fn infix_operator(kind: TokenKind) -> Option<OperatorInfo> {
    use TokenKind::*;
    let info = match kind {
        Star | Slash | Percent => OperatorInfo::left(MULTIPLICATIVE),
        Plus | Minus => OperatorInfo::left(ADDITIVE),
        Lt | Gt | LtEq | GtEq => OperatorInfo::left(RELATIONAL),
        EqEq | NotEq => OperatorInfo::left(EQUALITY),
        AndAnd => OperatorInfo::left(LOGICAL_AND),
        OrOr => OperatorInfo::left(LOGICAL_OR),
        Question => OperatorInfo {
            power: TERNARY,
            associativity: Associativity::Right,
            node: NodeKind::Ternary,
        },
        Assign | PlusAssign | MinusAssign | StarAssign | SlashAssign | PercentAssign => {
            OperatorInfo {
                power: ASSIGNMENT,
                associativity: Associativity::Right,
                node: NodeKind::Assignment,
            }
        }
        _ => return None,
    };
    Some(info)
}

/// 前置単項演算子かどうか
pub fn is_prefix_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Bang | TokenKind::Minus | TokenKind::PlusPlus | TokenKind::MinusMinus
    )
}

/// 後置演算を開始するトークンかどうか
pub fn is_postfix_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LeftParen | TokenKind::Dot | TokenKind::LeftBracket
    )
}
