//! パーサーモジュール
//!
//! このモジュールはトークン列を具象構文木（CST）に解析する責任を持ちます。
//! 再帰下降構文解析で文と宣言を、優先順位上昇法（precedence climbing）で
//! 式を解析します。
//!
//! パーサーはエラーで中断しません。文の途中で解析に失敗すると、その文の
//! 先頭から回復位置までのトークンを `Error` ノードにまとめ、次の文から
//! 解析を再開します。
//!
//! ```text
//! import { sqrt } from "math"
//!
//! fn length<T: Vector>(v: T) -> float {
//!     return sqrt(v.x * v.x + v.y * v.y)
//! }
//! ```

mod decl_parser;
mod expr;
mod expr_parser;
mod parser_impl;
pub mod precedence;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use crate::error::SyntaxError;
pub type ParseResult<T> = Result<T, SyntaxError>;
