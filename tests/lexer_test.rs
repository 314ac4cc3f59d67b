//! レキサーテスト
//!
//! 字句解析器の正常系、異常系、トリビアの扱いを確認する。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use foo_syntax::lexer::{tokenize, Lexer, TokenKind};
    use foo_syntax::Span;

    /// トークンの種類のみを取り出すヘルパー関数（Eofを除く）
    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .into_iter()
            .map(|token| token.kind)
            .filter(|kind| *kind != TokenKind::Eof)
            .collect()
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        // 最初の `*/` でコメントが閉じる
        let tokens = tokenize("/* x /* y */ z */");
        assert_eq!(tokens[0].leading[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].leading[0].text, "/* x /* y */");
        assert_eq!(
            tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
            vec!["z", "*", "/", ""]
        );
    }

    #[test_case("+", TokenKind::Plus; "plus")]
    #[test_case("++", TokenKind::PlusPlus; "increment")]
    #[test_case("+=", TokenKind::PlusAssign; "plus assign")]
    #[test_case("==", TokenKind::EqEq; "equality")]
    #[test_case("=>", TokenKind::FatArrow; "fat arrow")]
    #[test_case("->", TokenKind::Arrow; "arrow")]
    #[test_case("<=", TokenKind::LtEq; "less or equal")]
    #[test_case("&&", TokenKind::AndAnd; "logical and")]
    #[test_case("||", TokenKind::OrOr; "logical or")]
    #[test_case("|", TokenKind::Pipe; "pipe")]
    fn test_operator(source: &str, expected: TokenKind) {
        assert_eq!(kinds(source), vec![expected]);
    }

    #[test_case("int", TokenKind::IntType)]
    #[test_case("float", TokenKind::FloatType)]
    #[test_case("string", TokenKind::StringType)]
    #[test_case("bool", TokenKind::BoolType)]
    #[test_case("null", TokenKind::Null)]
    #[test_case("await", TokenKind::Await)]
    #[test_case("yield", TokenKind::Yield)]
    fn test_keyword(source: &str, expected: TokenKind) {
        assert_eq!(kinds(source), vec![expected]);
    }

    #[test]
    fn test_string_literals() {
        let tokens = tokenize(r#""a\"b" 'c\'d'"#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, r"'c\'d'");
    }

    #[test]
    fn test_unterminated_string_reports_quote() {
        let tokens = tokenize("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].text, "\"");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("let é_x");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        // 'é' は識別子に使えない
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].span, Span::new(4, 6));
        assert_eq!(tokens[2].text, "_x");
        assert_eq!(tokens[2].span, Span::new(6, 8));
    }

    #[test]
    fn test_trailing_trivia_is_on_eof() {
        let tokens = tokenize("x // done\n");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::new(10, 10));
        assert_eq!(
            eof.leading.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Whitespace,
                TokenKind::LineComment,
                TokenKind::Whitespace
            ]
        );
    }

    #[test]
    fn test_rendering_tokens_restores_source() {
        let source = "fn add(a: int) -> int {\n  /* sum */ return a + 1; // done\n}\n";
        let mut out = String::new();
        for token in tokenize(source) {
            token.render(&mut out);
        }
        assert_eq!(out, source);
    }

    #[test]
    fn test_iterator_ends_after_eof() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Identifier));
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
        // next_token keeps returning Eof
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
