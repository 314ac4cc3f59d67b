//! 式の解析モジュール
//!
//! 式の解析を複数のサブモジュールに分割して管理する。
//! 各モジュールは特定の種類の式の解析を担当する。
//!
//! - `binary_expr`: 中置演算子・三項演算子・代入（優先順位上昇法）
//! - `unary_expr`: 前置単項演算子と `async` / `await`
//! - `postfix_expr`: 呼び出し・メンバーアクセス・添字
//! - `literal_expr`: リテラルなどのプライマリ式

mod binary_expr;
mod literal_expr;
mod postfix_expr;
mod unary_expr;
