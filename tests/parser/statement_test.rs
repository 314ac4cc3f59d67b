//! 文のパーサーテスト

use pretty_assertions::assert_eq;

use foo_syntax::NodeKind;

use super::*;

#[test]
fn test_empty_source() {
    assert_eq!(assert_parse_success(""), "(source_file)");
    assert_eq!(assert_parse_success("  // only a comment\n"), "(source_file)");
}

#[test]
fn test_semicolons_are_optional() {
    assert_eq!(
        assert_parse_success("a; b\nc;"),
        "(source_file (expression_statement a) (expression_statement b) (expression_statement c))"
    );
}

#[test]
fn test_if_else_chain() {
    assert_eq!(
        assert_parse_success("if a { x } else if b { y } else { z }"),
        "(source_file (if a (block (expression_statement x)) \
         (if b (block (expression_statement y)) (block (expression_statement z)))))"
    );
}

#[test]
fn test_for_iterator_form() {
    assert_eq!(
        assert_parse_success("for running { tick() }"),
        "(source_file (for running (block (expression_statement (call tick)))))"
    );
}

#[test]
fn test_for_c_style_form() {
    let source = "for let i = 0; i < 10; i = i + 1 { print(i) }";
    assert_eq!(
        assert_parse_success(source),
        "(source_file (for (variable_decl i 0) (binary i < 10) \
         (assignment i = (binary i + 1)) (block (expression_statement (call print i)))))"
    );

    let tree = parse_source(source);
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), NodeKind::For);
    assert!(statement.has_field("init"));
    assert!(!statement.has_field("iterator"));
}

#[test]
fn test_for_c_style_with_expression_init() {
    assert_eq!(
        assert_parse_success("for i = 0; i < n; i += 1 {}"),
        "(source_file (for (assignment i = 0) (binary i < n) (assignment i += 1) (block)))"
    );
}

#[test]
fn test_match_statement() {
    let source = "match x {\n  1 => \"one\",\n  _ => { other() }\n}";
    assert_eq!(
        assert_parse_success(source),
        "(source_file (match x (match_arm 1 \"one\") \
         (match_arm _ (block (expression_statement (call other))))))"
    );
}

#[test]
fn test_return_forms() {
    assert_eq!(
        assert_parse_success("fn f() { return }"),
        "(source_file (function_decl f (block (return))))"
    );
    assert_eq!(
        assert_parse_success("fn f() { return a, b + 1 }"),
        "(source_file (function_decl f (block (return a (binary b + 1)))))"
    );
}

#[test]
fn test_return_before_function_declaration() {
    // `fn name` は値ではなく次の文
    assert_eq!(
        assert_parse_success("fn f() { return\nfn g() {} }"),
        "(source_file (function_decl f (block (return) (function_decl g (block)))))"
    );
}

#[test]
fn test_yield_and_break() {
    assert_eq!(
        assert_parse_success("for xs { yield x * 2; break }"),
        "(source_file (for xs (block (yield (binary x * 2)) (break))))"
    );
}

#[test]
fn test_let_with_if_and_match_values() {
    assert_eq!(
        assert_parse_success("let v = if c { 1 } else { 2 }"),
        "(source_file (variable_decl v (if c (block (expression_statement 1)) \
         (block (expression_statement 2)))))"
    );
    assert_eq!(
        assert_parse_success("const k = match n { 0 => a }"),
        "(source_file (constant_decl k (match n (match_arm 0 a))))"
    );
}

#[test]
fn test_statement_span_excludes_leading_trivia() {
    let tree = parse_source("  // note\n  let x = 1;\n");
    let statement = first_statement(&tree);
    assert_eq!(statement.span().start, 12);
    assert_eq!(statement.span().end, 22);
    assert_eq!(tree.root().span().end, 23);
}
