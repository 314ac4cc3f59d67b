//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use foo_syntax::{GrammarProfile, Node, ParserConfig, SyntaxError, SyntaxTree};

/// ソースコードをデフォルト設定で解析するヘルパー関数
pub fn parse_source(source: &str) -> SyntaxTree {
    SyntaxTree::parse(source)
}

/// コアプロファイルで解析するヘルパー関数
pub fn parse_core(source: &str) -> SyntaxTree {
    SyntaxTree::parse_with(source, ParserConfig::default().with_profile(GrammarProfile::Core))
}

/// 解析に成功することを確認し、S式を返すヘルパー関数
pub fn assert_parse_success(source: &str) -> String {
    let tree = parse_source(source);
    assert!(
        !tree.has_errors(),
        "Parsing should succeed: {:?}",
        tree.errors()
    );
    assert_eq!(tree.text(), source, "tree must reproduce the source");
    tree.to_sexp()
}

/// 解析に失敗することを確認し、エラーを返すヘルパー関数
pub fn assert_parse_error(source: &str) -> Vec<SyntaxError> {
    let tree = parse_source(source);
    let errors = tree.errors();
    assert!(!errors.is_empty(), "Parsing should fail: {}", tree.to_sexp());
    assert_eq!(tree.text(), source, "tree must reproduce the source");
    errors
}

/// 最初のトップレベル文
pub fn first_statement(tree: &SyntaxTree) -> &Node {
    tree.root()
        .child_nodes()
        .next()
        .expect("source should contain a statement")
}

// サブモジュールの宣言
#[cfg(test)]
mod declaration_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod expression_test;
#[cfg(test)]
mod statement_test;
#[cfg(test)]
mod type_test;
