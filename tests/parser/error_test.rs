//! エラー回復のパーサーテスト

use pretty_assertions::assert_eq;
use test_case::test_case;

use foo_syntax::{NodeKind, ParserConfig, Span, SyntaxError, SyntaxTree};

use super::*;

#[test]
fn test_recovery_keeps_following_statement() {
    let source = "let = 5; let y = 2;";
    let errors = assert_parse_error(source);
    assert_eq!(errors.len(), 1);

    let tree = parse_source(source);
    assert_eq!(tree.to_sexp(), "(source_file (error) (variable_decl y 2))");

    let bad = first_statement(&tree);
    assert!(bad.is_error());
    assert_eq!(bad.text(), "let = 5;");
    match bad.error() {
        Some(SyntaxError::Parse(error)) => {
            assert_eq!(error.offset, 4);
            assert_eq!(error.found, "'='");
            assert_eq!(error.expected, vec!["identifier".to_string()]);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test_case("let x = )", "expression"; "expression")]
#[test_case("let x: = 0", "type"; "type")]
fn test_expected_label(source: &str, label: &str) {
    match &assert_parse_error(source)[0] {
        SyntaxError::Parse(error) => assert_eq!(error.expected, vec![label.to_string()]),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_recovery_stops_before_statement_keyword() {
    let source = "let x = (1 +\nlet ok = 2";
    let errors = assert_parse_error(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        parse_source(source).to_sexp(),
        "(source_file (error) (variable_decl ok 2))"
    );
}

#[test]
fn test_recovery_inside_block_stops_at_closing_brace() {
    let source = "fn f() {\n  let = 1\n}\nlet z = 3";
    let errors = assert_parse_error(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        parse_source(source).to_sexp(),
        "(source_file (function_decl f (block (error))) (variable_decl z 3))"
    );
}

#[test]
fn test_stray_closing_brace_at_top_level() {
    let source = "} let a = 1";
    let errors = assert_parse_error(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        parse_source(source).to_sexp(),
        "(source_file (error) (variable_decl a 1))"
    );
}

#[test]
fn test_unclosed_block_reaches_end_of_input() {
    let source = "fn f() {\n  let x = 42;\n";
    let errors = assert_parse_error(source);
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        SyntaxError::Parse(error) => assert_eq!(error.found, "end of input"),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_unrecognized_character_reports_once() {
    let source = "let a = 1 $ 2\nlet b = 3";
    let errors = assert_parse_error(source);
    assert_eq!(
        errors,
        vec![SyntaxError::Lex(foo_syntax::LexError {
            offset: 10,
            character: '$',
        })]
    );
    let tree = parse_source(source);
    let last = tree.root().child_nodes().last().unwrap();
    assert_eq!(last.kind(), NodeKind::VariableDecl);
}

#[test]
fn test_errors_are_in_source_order() {
    let source = "let = 1\nlet ok = 2\nconst = 3";
    let offsets: Vec<_> = assert_parse_error(source)
        .iter()
        .map(SyntaxError::offset)
        .collect();
    assert_eq!(offsets, vec![4, 25]);
}

#[test]
fn test_recursion_limit() {
    let depth = 1000;
    let source = format!("let x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let tree = SyntaxTree::parse(source.as_str());

    let errors = tree.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        SyntaxError::RecursionLimitExceeded { limit: 128, .. }
    ));
    assert_eq!(tree.text(), source);
}

#[test]
fn test_recursion_limit_is_configurable() {
    let source = "let x = ((((1))))";
    let shallow = SyntaxTree::parse_with(source, ParserConfig::default().with_max_depth(4));
    assert!(shallow.has_errors());

    let deep = SyntaxTree::parse_with(source, ParserConfig::default().with_max_depth(64));
    assert!(!deep.has_errors());
}

/// `prefix` の後に `link` を `count` 回繰り返したソース
fn chain(prefix: &str, link: &str, count: usize, suffix: &str) -> String {
    format!("{}{}{}", prefix, link.repeat(count), suffix)
}

#[test_case("let x = x", " + 1", ""; "binary operators")]
#[test_case("let x = x", ".a", ""; "member access")]
#[test_case("let x = f", "(0)", ""; "calls")]
#[test_case("let x: int", "?", " = 1"; "optional types")]
fn test_long_left_chain_counts_against_depth_limit(prefix: &str, link: &str, suffix: &str) {
    let source = chain(prefix, link, 10_000, suffix);
    let tree = SyntaxTree::parse(source.as_str());

    let errors = tree.errors();
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(matches!(
        errors[0],
        SyntaxError::RecursionLimitExceeded { limit: 128, .. }
    ));
    assert!(first_statement(&tree).is_error());
    assert_eq!(tree.text(), source);
}

#[test_case("let x = x", " + 1", ""; "binary operators")]
#[test_case("let x = x", ".a", ""; "member access")]
#[test_case("let x: int", "?", " = 1"; "optional types")]
fn test_chain_within_depth_limit_parses(prefix: &str, link: &str, suffix: &str) {
    let source = chain(prefix, link, 100, suffix);
    let tree = SyntaxTree::parse(source.as_str());

    assert!(!tree.has_errors(), "{:?}", tree.errors());
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), NodeKind::VariableDecl);
    assert_eq!(statement.span(), Span::new(0, source.len()));
}

#[test_case("interface I {}"; "interface")]
#[test_case("impl I for T {}"; "impl")]
#[test_case("extension T {}"; "extension")]
#[test_case("macro m() {}"; "macro declaration")]
#[test_case("@m()"; "macro call")]
#[test_case("async f()"; "async")]
#[test_case("await f()"; "await")]
#[test_case("fn id<T>(x: T) {}"; "generics")]
#[test_case("let x: int | string = 1"; "union type")]
#[test_case("let x: int? = null"; "optional type")]
fn test_core_profile_rejects(source: &str) {
    let tree = parse_core(source);
    let errors = tree.errors();
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(matches!(errors[0], SyntaxError::UnsupportedInProfile { .. }));
    assert_eq!(tree.text(), source);

    // フルプロファイルでは受理される
    assert_parse_success(source);
}

#[test]
fn test_core_profile_accepts_core_constructs() {
    let source = "struct P { x: int }\nfn f(p: P) -> int { return p.x * 2 }\nlet v = [1, 2]";
    let tree = parse_core(source);
    assert!(!tree.has_errors(), "{:?}", tree.errors());
}

#[test]
fn test_error_converts_to_diagnostic() {
    let errors = assert_parse_error("let = 5");
    let diagnostic = errors[0].to_diagnostic(0);
    assert_eq!(diagnostic.code.as_deref(), Some("E0002"));
    assert_eq!(diagnostic.labels[0].range, 4..5);
}
