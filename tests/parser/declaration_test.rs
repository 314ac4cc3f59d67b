//! 宣言のパーサーテスト

use pretty_assertions::assert_eq;
use test_case::test_case;

use foo_syntax::{ImportForm, NodeKind};

use super::*;

#[test]
fn test_variable_declarations() {
    assert_eq!(
        assert_parse_success("let x = 1"),
        "(source_file (variable_decl x 1))"
    );
    assert_eq!(
        assert_parse_success("let a, b: int = pair()"),
        "(source_file (variable_decl a b int (call pair)))"
    );
    assert_eq!(
        assert_parse_success("const MAX: int = 10;"),
        "(source_file (constant_decl MAX int 10))"
    );
}

#[test]
fn test_function_declaration() {
    let source = "fn add(a: int, b: int = 1) -> int {\n  return a + b\n}";
    assert_eq!(
        assert_parse_success(source),
        "(source_file (function_decl add (parameter a int) (parameter b int 1) int \
         (block (return (binary a + b)))))"
    );
}

#[test]
fn test_generic_function() {
    assert_eq!(
        assert_parse_success("fn id<T: Show + Eq, U>(x: T) -> T { return x }"),
        "(source_file (function_decl id (generic_parameters (generic_parameter T Show Eq) \
         (generic_parameter U)) (parameter x T) T (block (return x))))"
    );
}

#[test]
fn test_struct_and_enum() {
    assert_eq!(
        assert_parse_success("struct Point { x: int, y: float? }"),
        "(source_file (struct_decl Point (field_declaration x int) \
         (field_declaration y (optional float))))"
    );
    assert_eq!(assert_parse_success("struct Unit {}"), "(source_file (struct_decl Unit))");
    assert_eq!(
        assert_parse_success("enum Color { Red, Green, Blue }"),
        "(source_file (enum_decl Color Red Green Blue))"
    );
}

#[test]
fn test_enum_requires_a_variant() {
    assert_parse_error("enum Empty {}");
}

#[test]
fn test_interface_declaration() {
    let source = "interface Shape {\n  fn area(self) -> float\n  fn name(self)\n}";
    assert_eq!(
        assert_parse_success(source),
        "(source_file (interface_decl Shape (interface_method area (parameter self) float) \
         (interface_method name (parameter self))))"
    );
}

#[test]
fn test_impl_and_extension() {
    assert_eq!(
        assert_parse_success("impl Shape for Circle { fn area(self) -> float { return 3.14 } }"),
        "(source_file (impl_decl Shape Circle (function_decl area (parameter self) float \
         (block (return 3.14)))))"
    );
    assert_eq!(
        assert_parse_success("extension Circle { fn grow(self) {} }"),
        "(source_file (extension_decl Circle (function_decl grow (parameter self) (block))))"
    );
}

#[test]
fn test_macro_declaration() {
    assert_eq!(
        assert_parse_success("macro twice(x) { x; x }"),
        "(source_file (macro_decl twice (parameter x) \
         (block (expression_statement x) (expression_statement x))))"
    );
}

#[test_case("import \"std/io\"", ImportForm::Bare, "(import \"std/io\")"; "bare")]
#[test_case(
    "import { read, write } from \"std/io\"",
    ImportForm::Destructured,
    "(import read write \"std/io\")";
    "destructured"
)]
#[test_case(
    "import * as io from \"std/io\"",
    ImportForm::Wildcard,
    "(import io \"std/io\")";
    "wildcard"
)]
fn test_import_forms(source: &str, form: ImportForm, expected: &str) {
    assert_eq!(assert_parse_success(source), format!("(source_file {})", expected));

    let tree = parse_source(source);
    let import = first_statement(&tree);
    assert_eq!(import.kind(), NodeKind::Import);
    assert_eq!(import.import_form(), Some(form));
    assert!(import.has_field("path"));
}

#[test]
fn test_import_without_source_is_error() {
    assert_parse_error("import io");
    assert_parse_error("import { } from \"m\"");
}

#[test_case("export let x = 1", "(export (variable_decl x 1))")]
#[test_case("export const y = 2", "(export (constant_decl y 2))")]
#[test_case("export fn f() {}", "(export (function_decl f (block)))")]
#[test_case("export struct S { a: int }", "(export (struct_decl S (field_declaration a int)))")]
#[test_case("export enum E { A }", "(export (enum_decl E A))")]
fn test_export(source: &str, expected: &str) {
    assert_eq!(assert_parse_success(source), format!("(source_file {})", expected));
}

#[test]
fn test_export_rejects_other_statements() {
    assert_parse_error("export x");
}
