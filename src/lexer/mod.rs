//! Lexical analysis module for the Foo language.
//!
//! This module turns Foo source text into a stream of classified tokens.
//! Whitespace and comments are never handed to the parser on their own:
//! they are collected as *leading trivia* of the next significant token, so
//! the concrete syntax tree can reproduce the source text byte for byte.

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cst::Span;

/// Token kinds for the Foo language
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\n]*")]
    LineComment,
    // No nesting: the first `*/` after a run of stars closes the comment.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // Keywords
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("fn")]
    Fn,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("interface")]
    Interface,
    #[token("impl")]
    Impl,
    #[token("extension")]
    Extension,
    #[token("macro")]
    Macro,
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("from")]
    From,
    #[token("as")]
    As,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("match")]
    Match,
    #[token("return")]
    Return,
    #[token("yield")]
    Yield,
    #[token("break")]
    Break,
    #[token("async")]
    Async,
    #[token("await")]
    Await,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Primitive type keywords
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("string")]
    StringType,
    #[token("bool")]
    BoolType,

    // Identifiers (keywords win on an exact match)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Identifier,

    // Literals
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#)]
    String,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token("|")]
    Pipe,
    #[token("@")]
    At,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// Whitespace and comments
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Let | Const
                | Fn
                | Struct
                | Enum
                | Interface
                | Impl
                | Extension
                | Macro
                | Import
                | Export
                | From
                | As
                | If
                | Else
                | For
                | Match
                | Return
                | Yield
                | Break
                | Async
                | Await
                | True
                | False
                | Null
                | IntType
                | FloatType
                | StringType
                | BoolType
        )
    }

    /// Keywords that can only appear at the start of a statement.
    ///
    /// Error recovery stops in front of these.
    pub fn starts_statement(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Let | Const
                | Fn
                | Struct
                | Enum
                | Interface
                | Impl
                | Extension
                | Macro
                | Import
                | Export
                | If
                | For
                | Match
                | Return
                | Yield
                | Break
        )
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::IntType | TokenKind::FloatType | TokenKind::StringType | TokenKind::BoolType
        )
    }

    /// Tokens that may begin an expression
    pub fn starts_expression(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | Integer
                | Float
                | String
                | True
                | False
                | Null
                | LeftParen
                | LeftBracket
                | LeftBrace
                | Bang
                | Minus
                | PlusPlus
                | MinusMinus
                | At
                | Fn
                | Async
                | Await
        )
    }

    /// Human readable description used in error messages
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            Whitespace => "whitespace",
            LineComment => "line comment",
            BlockComment => "block comment",
            Let => "'let'",
            Const => "'const'",
            Fn => "'fn'",
            Struct => "'struct'",
            Enum => "'enum'",
            Interface => "'interface'",
            Impl => "'impl'",
            Extension => "'extension'",
            Macro => "'macro'",
            Import => "'import'",
            Export => "'export'",
            From => "'from'",
            As => "'as'",
            If => "'if'",
            Else => "'else'",
            For => "'for'",
            Match => "'match'",
            Return => "'return'",
            Yield => "'yield'",
            Break => "'break'",
            Async => "'async'",
            Await => "'await'",
            True => "'true'",
            False => "'false'",
            Null => "'null'",
            IntType => "'int'",
            FloatType => "'float'",
            StringType => "'string'",
            BoolType => "'bool'",
            Identifier => "identifier",
            Integer => "integer literal",
            Float => "float literal",
            String => "string literal",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            Assign => "'='",
            PlusAssign => "'+='",
            MinusAssign => "'-='",
            StarAssign => "'*='",
            SlashAssign => "'/='",
            PercentAssign => "'%='",
            EqEq => "'=='",
            NotEq => "'!='",
            Lt => "'<'",
            Gt => "'>'",
            LtEq => "'<='",
            GtEq => "'>='",
            AndAnd => "'&&'",
            OrOr => "'||'",
            Bang => "'!'",
            Question => "'?'",
            Pipe => "'|'",
            At => "'@'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            LeftBracket => "'['",
            RightBracket => "']'",
            Comma => "','",
            Semicolon => "';'",
            Colon => "':'",
            Dot => "'.'",
            Arrow => "'->'",
            FatArrow => "'=>'",
            Eof => "end of input",
            Error => "unrecognized character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token together with its lexeme, location and leading trivia
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    /// Whitespace and comments between the previous token and this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading: Vec<Token>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            leading: Vec::new(),
        }
    }

    /// Span including the leading trivia
    pub fn full_span(&self) -> Span {
        match self.leading.first() {
            Some(first) => Span::new(first.span.start, self.span.end),
            None => self.span,
        }
    }

    /// Append the trivia and the lexeme to `out`
    pub fn render(&self, out: &mut String) {
        for trivia in &self.leading {
            out.push_str(&trivia.text);
        }
        out.push_str(&self.text);
    }

    /// Description of the token for "found ..." messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => TokenKind::Eof.describe().to_string(),
            _ => format!("'{}'", self.text),
        }
    }

    pub(crate) fn shift(&mut self, delta: isize) {
        self.span = self.span.shifted(delta);
        for trivia in &mut self.leading {
            trivia.shift(delta);
        }
    }

    /// Equality after moving `self` by `delta` bytes
    pub(crate) fn eq_shifted(&self, other: &Token, delta: isize) -> bool {
        self.kind == other.kind
            && self.text == other.text
            && self.span.shifted(delta) == other.span
            && self.leading.len() == other.leading.len()
            && self
                .leading
                .iter()
                .zip(&other.leading)
                .all(|(a, b)| a.eq_shifted(b, delta))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{}..{}", self.kind, self.text, self.span.start, self.span.end)
    }
}

/// Lexer for the Foo language
///
/// The lexer is a cursor over the source text. Each call to
/// [`Lexer::next_token`] skips trivia, scans one significant token and moves
/// the cursor past it. It can be started at any byte offset, which is what
/// the incremental reparser relies on.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Start lexing at `cursor` (must be a char boundary)
    pub fn at(source: &'a str, cursor: usize) -> Self {
        Self {
            source,
            cursor: cursor.min(source.len()),
            finished: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scan the next significant token, attaching the trivia before it.
    ///
    /// Returns an [`TokenKind::Eof`] token (carrying the trailing trivia)
    /// once the input is exhausted, and keeps returning it afterwards.
    pub fn next_token(&mut self) -> Token {
        let mut leading = Vec::new();

        loop {
            let (kind, span) = self.scan_raw(self.cursor);
            self.cursor = span.end;
            let token = Token::new(kind, &self.source[span.start..span.end], span);

            if kind.is_trivia() {
                leading.push(token);
                continue;
            }

            return Token { leading, ..token };
        }
    }

    /// Classify the raw token starting at `cursor`
    fn scan_raw(&self, cursor: usize) -> (TokenKind, Span) {
        let rest = &self.source[cursor..];
        let mut raw = TokenKind::lexer(rest);

        match raw.next() {
            None => (TokenKind::Eof, Span::new(cursor, cursor)),
            Some(Ok(kind)) => {
                let span = raw.span();
                (kind, Span::new(cursor + span.start, cursor + span.end))
            }
            Some(Err(())) => {
                // A failed longer match (an unterminated `/*`) falls back to
                // the first character alone; anything else unrecognized is
                // reported one character at a time.
                let width = rest.chars().next().map_or(1, char::len_utf8);
                let kind = match TokenKind::lexer(&rest[..width]).next() {
                    Some(Ok(kind)) => kind,
                    _ => TokenKind::Error,
                };
                (kind, Span::new(cursor, cursor + width))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Tokenize the whole source. The last token is always [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
