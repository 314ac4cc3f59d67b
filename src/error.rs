//! 構文解析のエラー型
//!
//! このモジュールは、字句解析・構文解析で発生するエラーと、
//! codespan-reporting による診断への変換を提供します。
//! パーサーはエラーで中断せず、エラーはすべて構文木の中に記録されます。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::Serialize;
use thiserror::Error;

use crate::cst::{NodeKind, Span};
use crate::lexer::{Token, TokenKind};

/// 構文木に記録されるエラー
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyntaxError {
    /// 字句解析エラー
    #[error(transparent)]
    Lex(#[from] LexError),

    /// 構文解析エラー
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// ネストの上限超過
    #[error("ネストが深すぎます: 上限 {limit} を超えました")]
    RecursionLimitExceeded { offset: usize, limit: usize },

    /// 現在のプロファイルでは使用できない構文
    #[error("{construct} はコアプロファイルでは使用できません")]
    UnsupportedInProfile {
        offset: usize,
        construct: String,
        span: Span,
    },

    /// ノード構築時のスキーマ違反
    #[error("構文木の構築に失敗しました: {error}")]
    Schema { error: SchemaError, span: Span },
}

/// 認識できない文字
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("認識できない文字: '{character}'")]
pub struct LexError {
    pub offset: usize,
    pub character: char,
}

/// 期待したトークンが見つからなかった
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}を期待しましたが、{found}が見つかりました", join_expected(.expected))]
pub struct ParseError {
    pub offset: usize,
    /// 期待していたトークンまたは構文の説明
    pub expected: Vec<String>,
    /// 実際に見つかったトークンの説明
    pub found: String,
    pub found_kind: TokenKind,
    pub span: Span,
}

/// ノードのフィールドがスキーマに合わない
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaError {
    #[error("{kind} に未知のフィールド '{field}' があります")]
    UnknownField { kind: NodeKind, field: String },

    #[error("{kind} のフィールド '{field}' の個数が不正です ({count} 個)")]
    FieldCount {
        kind: NodeKind,
        field: String,
        count: usize,
    },

    #[error("{kind} の制約に違反しています: {rule}")]
    Constraint { kind: NodeKind, rule: String },
}

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "入力".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} または {}", init.join("、"), last),
    }
}

impl LexError {
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.character.len_utf8())
    }
}

impl ParseError {
    pub fn new(expected: Vec<String>, token: &Token) -> Self {
        Self {
            offset: token.span.start,
            expected,
            found: token.describe(),
            found_kind: token.kind,
            span: token.span,
        }
    }
}

impl SyntaxError {
    /// Error tokenに対応する字句解析エラー
    pub fn lex(token: &Token) -> Self {
        SyntaxError::Lex(LexError {
            offset: token.span.start,
            character: token.text.chars().next().unwrap_or('\0'),
        })
    }

    /// エラーの位置（バイトオフセット）
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::Lex(e) => e.offset,
            SyntaxError::Parse(e) => e.offset,
            SyntaxError::RecursionLimitExceeded { offset, .. } => *offset,
            SyntaxError::UnsupportedInProfile { offset, .. } => *offset,
            SyntaxError::Schema { span, .. } => span.start,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span(),
            SyntaxError::Parse(e) => e.span,
            SyntaxError::RecursionLimitExceeded { offset, .. } => Span::new(*offset, *offset),
            SyntaxError::UnsupportedInProfile { span, .. } => *span,
            SyntaxError::Schema { span, .. } => *span,
        }
    }

    /// 診断コード
    pub fn code(&self) -> &'static str {
        match self {
            SyntaxError::Lex(_) => "E0001",
            SyntaxError::Parse(_) => "E0002",
            SyntaxError::RecursionLimitExceeded { .. } => "E0003",
            SyntaxError::UnsupportedInProfile { .. } => "E0004",
            SyntaxError::Schema { .. } => "E0005",
        }
    }

    /// 位置を `delta` バイト移動する
    pub(crate) fn shift(&mut self, delta: isize) {
        let move_offset = |offset: &mut usize| *offset = offset.saturating_add_signed(delta);
        match self {
            SyntaxError::Lex(e) => move_offset(&mut e.offset),
            SyntaxError::Parse(e) => {
                move_offset(&mut e.offset);
                e.span = e.span.shifted(delta);
            }
            SyntaxError::RecursionLimitExceeded { offset, .. } => move_offset(offset),
            SyntaxError::UnsupportedInProfile { offset, span, .. } => {
                move_offset(offset);
                *span = span.shifted(delta);
            }
            SyntaxError::Schema { span, .. } => *span = span.shifted(delta),
        }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let span = self.span();
        let label = Label::primary(file_id, span.start..span.end);
        let label = match self {
            SyntaxError::Lex(_) => label.with_message("ここに不正な文字があります"),
            SyntaxError::Parse(e) => label.with_message(format!("{}が見つかりました", e.found)),
            SyntaxError::RecursionLimitExceeded { .. } => {
                label.with_message("ここでネストの上限に達しました")
            }
            SyntaxError::UnsupportedInProfile { .. } => {
                label.with_message("フルプロファイルでのみ使用できます")
            }
            SyntaxError::Schema { .. } => label,
        };

        Diagnostic::error()
            .with_message(self.to_string())
            .with_code(self.code())
            .with_labels(vec![label])
    }
}

/// ライブラリの入出力エラー
#[derive(Error, Debug)]
pub enum FooError {
    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type FooResult<T> = Result<T, FooError>;
