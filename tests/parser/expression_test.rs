//! 式のパーサーテスト

use pretty_assertions::assert_eq;
use test_case::test_case;

use super::*;

/// 式文として解析し、式部分のS式を返す
fn expr(source: &str) -> String {
    assert_parse_success(source);
    let tree = parse_source(source);
    first_statement(&tree)
        .field_node("expression")
        .expect("expression statement")
        .to_sexp()
}

#[test_case("1 + 2 * 3", "(binary 1 + (binary 2 * 3))"; "multiplication binds tighter")]
#[test_case("2 * 3 + 1", "(binary (binary 2 * 3) + 1)"; "left operand multiplication")]
#[test_case("a - b - c", "(binary (binary a - b) - c)"; "subtraction is left associative")]
#[test_case("a / b % c", "(binary (binary a / b) % c)"; "multiplicative is left associative")]
#[test_case("a < b == c > d", "(binary (binary a < b) == (binary c > d))"; "relational over equality")]
#[test_case("a || b && c", "(binary a || (binary b && c))"; "and binds tighter than or")]
#[test_case("a == b && c != d", "(binary (binary a == b) && (binary c != d))"; "equality over and")]
#[test_case("(1 + 2) * 3", "(binary (parenthesized (binary 1 + 2)) * 3)"; "parentheses")]
fn test_binary_precedence(source: &str, expected: &str) {
    assert_eq!(expr(source), expected);
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(expr("a = b = c"), "(assignment a = (assignment b = c))");
    assert_eq!(expr("x += y * 2"), "(assignment x += (binary y * 2))");
}

#[test]
fn test_ternary() {
    assert_eq!(expr("a ? b : c ? d : e"), "(ternary a b (ternary c d e))");
    assert_eq!(expr("a || b ? 1 : 2"), "(ternary (binary a || b) 1 2)");
    // 中央の式には代入を書ける
    assert_eq!(expr("c ? x = 1 : y"), "(ternary c (assignment x = 1) y)");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(expr("a.b(c)[d]"), "(index (call (member a b) c) d)");
    assert_eq!(expr("f()()"), "(call (call f))");
    assert_eq!(expr("obj.list[0].len()"), "(call (member (index (member obj list) 0) len))");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(expr("-x * y"), "(binary (unary - x) * y)");
    assert_eq!(expr("!!done"), "(unary ! (unary ! done))");
    assert_eq!(expr("++count"), "(unary ++ count)");
}

#[test]
fn test_async_and_await() {
    assert_eq!(expr("await fetch(url)"), "(await (call fetch url))");
    assert_eq!(expr("async load() + 1"), "(binary (async (call load)) + 1)");
}

#[test_case("42", "42")]
#[test_case("3.14", "3.14")]
#[test_case("\"text\"", "\"text\"")]
#[test_case("'single'", "'single'")]
#[test_case("true", "true")]
#[test_case("null", "null")]
fn test_literals(source: &str, expected: &str) {
    assert_eq!(expr(source), expected);
}

#[test]
fn test_array_literal() {
    assert_eq!(expr("[]"), "(array_literal)");
    assert_eq!(expr("[1, [2, 3]]"), "(array_literal 1 (array_literal 2 3))");
}

#[test]
fn test_object_literal() {
    assert_eq!(expr("{}"), "(object_literal)");
    assert_eq!(
        expr("{name: \"a\", \"key\": 1}"),
        "(object_literal (object_field name \"a\") (object_field \"key\" 1))"
    );
}

#[test]
fn test_function_literal() {
    assert_eq!(
        expr("fn(x: int) => x + 1"),
        "(function_literal (parameter x int) (binary x + 1))"
    );
    assert_eq!(
        expr("fn() { return 1 }"),
        "(function_literal (block (return 1)))"
    );
}

#[test]
fn test_macro_call() {
    assert_eq!(expr("@log(\"hi\", x)"), "(macro_call log \"hi\" x)");
}

#[test]
fn test_call_arguments_are_full_expressions() {
    assert_eq!(
        expr("f(a = 1, b ? c : d)"),
        "(call f (assignment a = 1) (ternary b c d))"
    );
}
