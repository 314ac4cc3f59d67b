//! 型注釈のパーサーテスト

use pretty_assertions::assert_eq;
use test_case::test_case;

use foo_syntax::{NodeKind, Parser, ParserConfig};

use super::*;

/// `let v: <type> = 0` の型部分のS式を返す
fn annotation(ty: &str) -> String {
    let source = format!("let v: {} = 0", ty);
    assert_parse_success(&source);
    let tree = parse_source(&source);
    first_statement(&tree)
        .field_node("type")
        .expect("type annotation")
        .to_sexp()
}

#[test_case("int", "int")]
#[test_case("string", "string")]
#[test_case("User", "User")]
#[test_case("A | B?", "(union A (optional B))"; "optional binds tighter than union")]
#[test_case("int | string | null_t", "(union int string null_t)"; "flat union")]
#[test_case("(int, bool)", "(tuple int bool)"; "tuple")]
#[test_case("(int | bool)?", "(optional (tuple (union int bool)))"; "optional tuple of union")]
#[test_case("int??", "(optional (optional int))"; "stacked optional")]
fn test_type_annotation(ty: &str, expected: &str) {
    assert_eq!(annotation(ty), expected);
}

#[test]
fn test_type_node_kinds() {
    let tree = parse_source("let v: Foo | int = 0");
    let ty = first_statement(&tree).field_node("type").unwrap();
    assert_eq!(ty.kind(), NodeKind::Union);
    let kinds: Vec<_> = ty.field_nodes("variant").map(|v| v.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::NamedType, NodeKind::Primitive]);
}

#[test]
fn test_parse_type_annotation_directly() {
    let mut parser = Parser::new("string? | User", ParserConfig::default());
    let ty = parser.parse_type_annotation().unwrap();
    assert_eq!(ty.to_sexp(), "(union (optional string) User)");
}

#[test]
fn test_missing_type_is_error() {
    let errors = assert_parse_error("let v: = 0");
    assert_eq!(errors.len(), 1);
}
