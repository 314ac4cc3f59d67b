//! メインパーサー構造とユーティリティ

use crate::config::{Feature, ParserConfig};
use crate::cst::{Node, NodeBuilder, NodeKind, Span};
use crate::error::{ParseError, SyntaxError};
use crate::lexer::{tokenize, Token, TokenKind};

use super::ParseResult;

/// Fooパーサー
///
/// トークン列は必ず `Eof` で終わる。
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) config: ParserConfig,
    pub(super) depth: usize,
}

impl Parser {
    pub fn new(source: &str, config: ParserConfig) -> Self {
        Self::from_tokens(tokenize(source), config)
    }

    /// 字句解析済みのトークン列から作成
    pub fn from_tokens(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        }
        Self {
            tokens,
            current: 0,
            config,
            depth: 0,
        }
    }

    /// ソースファイル全体を解析
    ///
    /// 常にルートの `SourceFile` ノードを返す。エラーは木の中に記録される。
    pub fn parse(mut self) -> Node {
        let mut root = NodeBuilder::new(NodeKind::SourceFile);
        while !self.is_at_end() {
            root.field("statement", self.parse_top_level_statement());
        }
        self.finish_root(root)
    }

    /// 現在位置からトップレベルの文を1つ解析（エラー回復込み）
    pub(crate) fn parse_top_level_statement(&mut self) -> Node {
        self.parse_statement_or_recover(false)
    }

    /// `Eof` トークンを付けてルートを完成させる
    pub(crate) fn finish_root(mut self, mut root: NodeBuilder) -> Node {
        let eof = self.advance();
        let end = eof.span.end;
        root.token(eof);
        root.span(Span::new(0, end));
        root.finish_or_error()
    }

    /// 単一の式を解析
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        self.parse_expression_internal()
    }

    /// 単一の型を解析
    pub fn parse_type_annotation(&mut self) -> ParseResult<Node> {
        self.parse_type()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークン位置
    pub(crate) fn position(&self) -> usize {
        self.current
    }

    /// トークン位置を移動
    pub(crate) fn seek(&mut self, position: usize) {
        self.current = position.min(self.tokens.len() - 1);
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(super) fn current_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// 特定のオフセット先のトークンの種類を取得
    pub(super) fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.current + offset)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// 次のトークンに進み、消費したトークンを返す
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// 終端に到達したかチェック
    pub(crate) fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&[kind.describe()]))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::Identifier)?;
        self.leaf(NodeKind::Identifier, token)
    }

    /// 文字列リテラルを期待
    pub(super) fn expect_string(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenKind::String)?;
        self.leaf(NodeKind::StringLiteral, token)
    }

    /// トークン1つからなる葉ノードを作成
    pub(super) fn leaf(&self, kind: NodeKind, token: Token) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(kind);
        builder.field("token", token);
        self.finish(builder)
    }

    /// ノードを完成させる。スキーマ違反は構文エラーとして扱う
    pub(super) fn finish(&self, builder: NodeBuilder) -> ParseResult<Node> {
        let span = builder.current_span();
        builder
            .finish()
            .map_err(|error| SyntaxError::Schema { error, span })
    }

    /// 現在のトークンに対する「期待したものが見つからない」エラーを作成
    pub(super) fn error_expected(&self, expected: &[&str]) -> SyntaxError {
        let token = self.current_token();
        if token.kind == TokenKind::Error {
            // 不正な文字そのものを報告する
            return SyntaxError::lex(token);
        }
        let expected = expected.iter().map(|e| e.to_string()).collect();
        ParseError::new(expected, token).into()
    }

    /// プロファイルで許可された構文かチェック
    pub(super) fn require(&self, feature: Feature) -> ParseResult<()> {
        if self.config.profile.allows(feature) {
            return Ok(());
        }
        let span = self.current_token().span;
        log::debug!("{} rejected by the {} profile", feature, self.config.profile);
        Err(SyntaxError::UnsupportedInProfile {
            offset: span.start,
            construct: feature.description().to_string(),
            span,
        })
    }

    /// 再帰の深さを制限して `f` を実行
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.descend()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// 左に伸びる連鎖（`a + b + c`、`a.b.c`、`T??`）を解析
    ///
    /// 連鎖の各段は `f` の中で [`Parser::descend`] して1段の深さとして数える。
    /// 増えた深さは `f` の終了時に戻す。
    pub(super) fn chained<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let depth = self.depth;
        let result = f(self);
        self.depth = depth;
        result
    }

    /// 深さを1段増やす。上限に達していればエラー
    pub(super) fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(SyntaxError::RecursionLimitExceeded {
                offset: self.current_token().span.start,
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// 区切り文字で区切られたリストを解析し、`field` として追加
    ///
    /// 末尾の区切り文字は許可しない。`close` の直前で止まる。
    pub(super) fn parse_separated(
        &mut self,
        builder: &mut NodeBuilder,
        field: &'static str,
        separator: TokenKind,
        close: TokenKind,
        at_least_one: bool,
        mut item: impl FnMut(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<()> {
        if self.check(close) && !at_least_one {
            return Ok(());
        }
        loop {
            builder.field(field, item(self)?);
            match self.match_token(separator) {
                Some(token) => {
                    builder.token(token);
                }
                None => return Ok(()),
            }
        }
    }

    // ==================== エラー回復 ====================

    /// 文を解析し、失敗した場合は `Error` ノードを作る
    pub(super) fn parse_statement_or_recover(&mut self, in_block: bool) -> Node {
        let start = self.current;
        match self.parse_statement() {
            Ok(node) => node,
            Err(error) => self.recover(start, error, in_block),
        }
    }

    /// 文の先頭 `start` から回復位置までのトークンを `Error` ノードにまとめる
    ///
    /// 回復位置:
    /// - 次の `;` の直後
    /// - ブロック内では、ブロックを閉じる `}` の直前（トップレベルでは飲み込む）
    /// - 新しい文を開始するキーワードの直前
    ///
    /// 少なくとも1トークンは必ず消費する。
    fn recover(&mut self, start: usize, error: SyntaxError, in_block: bool) -> Node {
        log::debug!("recovering from syntax error at {}: {}", error.offset(), error);

        self.current = start.max(self.current.min(self.tokens.len() - 1));
        let mut balance: isize = self.tokens[start..self.current]
            .iter()
            .map(|t| brace_delta(t.kind))
            .sum();

        if self.current == start && !self.is_at_end() {
            balance += brace_delta(self.current_kind());
            self.current += 1;
        }

        while !self.is_at_end() {
            let kind = self.current_kind();
            if balance > 0 {
                balance += brace_delta(kind);
                self.current += 1;
                continue;
            }
            match kind {
                TokenKind::Semicolon => {
                    self.current += 1;
                    break;
                }
                TokenKind::RightBrace if in_block => break,
                TokenKind::RightBrace => {
                    self.current += 1;
                    break;
                }
                _ if kind.starts_statement() => break,
                _ => {
                    balance += brace_delta(kind);
                    self.current += 1;
                }
            }
        }

        let mut builder = NodeBuilder::new(NodeKind::Error);
        for token in &self.tokens[start..self.current] {
            builder.token(token.clone());
        }
        builder.finish_error(error)
    }
}

fn brace_delta(kind: TokenKind) -> isize {
    match kind {
        TokenKind::LeftBrace => 1,
        TokenKind::RightBrace => -1,
        _ => 0,
    }
}
