//! 宣言の解析
//!
//! 変数・定数・関数・構造体・列挙型・インターフェース・impl・拡張・
//! マクロの宣言と、import/export文を扱う。

use crate::config::Feature;
use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// 宣言を解析
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Node> {
        match self.current_kind() {
            TokenKind::Let => self.parse_variable_decl(),
            TokenKind::Const => self.parse_constant_decl(),
            TokenKind::Fn => self.parse_function_decl(),
            TokenKind::Struct => self.parse_struct_decl(),
            TokenKind::Enum => self.parse_enum_decl(),
            TokenKind::Interface => self.parse_interface_decl(),
            TokenKind::Impl => self.parse_impl_decl(),
            TokenKind::Extension => self.parse_extension_decl(),
            TokenKind::Macro => self.parse_macro_decl(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            _ => Err(self.error_expected(&["declaration"])),
        }
    }

    /// 変数宣言を解析: `let a [, b ...] [: type] = value`
    pub(super) fn parse_variable_decl(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::VariableDecl);
        builder.token(self.expect(TokenKind::Let)?);

        builder.field("name", self.expect_identifier()?);
        while let Some(comma) = self.match_token(TokenKind::Comma) {
            builder.token(comma);
            builder.field("name", self.expect_identifier()?);
        }

        self.parse_binding_tail(&mut builder)?;
        self.finish(builder)
    }

    /// 定数宣言を解析: `const name [: type] = value`
    fn parse_constant_decl(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::ConstantDecl);
        builder.token(self.expect(TokenKind::Const)?);
        builder.field("name", self.expect_identifier()?);
        self.parse_binding_tail(&mut builder)?;
        self.finish(builder)
    }

    /// `[: type] = value` の部分。値には `if` / `match` も書ける
    fn parse_binding_tail(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        if let Some(colon) = self.match_token(TokenKind::Colon) {
            builder.token(colon);
            builder.field("type", self.parse_type()?);
        }

        builder.token(self.expect(TokenKind::Assign)?);

        let value = match self.current_kind() {
            TokenKind::If => self.nested(|p| p.parse_if_statement())?,
            TokenKind::Match => self.nested(|p| p.parse_match_statement())?,
            _ => self.parse_expression_internal()?,
        };
        builder.field("value", value);
        Ok(())
    }

    /// 関数宣言を解析: `fn name [<generics>] (params) [-> type] { ... }`
    pub(super) fn parse_function_decl(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::FunctionDecl);
        builder.token(self.expect(TokenKind::Fn)?);
        builder.field("name", self.expect_identifier()?);

        if self.check(TokenKind::Lt) {
            builder.field("generics", self.parse_generic_parameters()?);
        }

        self.parse_parameter_list(&mut builder)?;
        self.parse_return_type(&mut builder)?;
        builder.field("body", self.parse_block()?);
        self.finish(builder)
    }

    /// ジェネリックパラメータを解析: `<T: A + B, U>`
    fn parse_generic_parameters(&mut self) -> ParseResult<Node> {
        self.require(Feature::Generics)?;

        let mut builder = NodeBuilder::new(NodeKind::GenericParameters);
        builder.token(self.expect(TokenKind::Lt)?);
        self.parse_separated(
            &mut builder,
            "parameter",
            TokenKind::Comma,
            TokenKind::Gt,
            true,
            |p| p.parse_generic_parameter(),
        )?;
        builder.token(self.expect(TokenKind::Gt)?);
        self.finish(builder)
    }

    fn parse_generic_parameter(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::GenericParameter);
        builder.field("name", self.expect_identifier()?);

        if let Some(colon) = self.match_token(TokenKind::Colon) {
            builder.token(colon);
            builder.field("bound", self.expect_identifier()?);
            while let Some(plus) = self.match_token(TokenKind::Plus) {
                builder.token(plus);
                builder.field("bound", self.expect_identifier()?);
            }
        }

        self.finish(builder)
    }

    /// 引数リストを解析: `(name [: type] [= default], ...)`
    pub(super) fn parse_parameter_list(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        builder.token(self.expect(TokenKind::LeftParen)?);
        self.parse_separated(
            builder,
            "parameter",
            TokenKind::Comma,
            TokenKind::RightParen,
            false,
            |p| p.parse_parameter(),
        )?;
        builder.token(self.expect(TokenKind::RightParen)?);
        Ok(())
    }

    pub(super) fn parse_parameter(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Parameter);
        builder.field("name", self.expect_identifier()?);

        if let Some(colon) = self.match_token(TokenKind::Colon) {
            builder.token(colon);
            builder.field("type", self.parse_type()?);
        }
        if let Some(assign) = self.match_token(TokenKind::Assign) {
            builder.token(assign);
            builder.field("default", self.parse_expression_internal()?);
        }

        self.finish(builder)
    }

    fn parse_return_type(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        if let Some(arrow) = self.match_token(TokenKind::Arrow) {
            builder.token(arrow);
            builder.field("return_type", self.parse_type()?);
        }
        Ok(())
    }

    /// 構造体宣言を解析: `struct Name { field: Type, ... }`
    fn parse_struct_decl(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::StructDecl);
        builder.token(self.expect(TokenKind::Struct)?);
        builder.field("name", self.expect_identifier()?);
        builder.token(self.expect(TokenKind::LeftBrace)?);
        self.parse_separated(
            &mut builder,
            "field",
            TokenKind::Comma,
            TokenKind::RightBrace,
            false,
            |p| p.parse_field_declaration(),
        )?;
        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    fn parse_field_declaration(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::FieldDeclaration);
        builder.field("name", self.expect_identifier()?);
        builder.token(self.expect(TokenKind::Colon)?);
        builder.field("type", self.parse_type()?);
        self.finish(builder)
    }

    /// 列挙型宣言を解析: `enum Name { A, B }`
    fn parse_enum_decl(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::EnumDecl);
        builder.token(self.expect(TokenKind::Enum)?);
        builder.field("name", self.expect_identifier()?);
        builder.token(self.expect(TokenKind::LeftBrace)?);
        self.parse_separated(
            &mut builder,
            "variant",
            TokenKind::Comma,
            TokenKind::RightBrace,
            true,
            |p| p.expect_identifier(),
        )?;
        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    /// インターフェース宣言を解析: `interface Name { fn m(params) [-> type] ... }`
    fn parse_interface_decl(&mut self) -> ParseResult<Node> {
        self.require(Feature::InterfaceDecl)?;

        let mut builder = NodeBuilder::new(NodeKind::InterfaceDecl);
        builder.token(self.expect(TokenKind::Interface)?);
        builder.field("name", self.expect_identifier()?);
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let method = self.nested(|p| p.parse_interface_method())?;
            builder.field("method", method);
        }

        builder.token(self.expect(TokenKind::RightBrace)?);
        self.finish(builder)
    }

    fn parse_interface_method(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::InterfaceMethod);
        builder.token(self.expect(TokenKind::Fn)?);
        builder.field("name", self.expect_identifier()?);
        self.parse_parameter_list(&mut builder)?;
        self.parse_return_type(&mut builder)?;
        self.finish(builder)
    }

    /// impl宣言を解析: `impl Interface for Type { fn ... }`
    fn parse_impl_decl(&mut self) -> ParseResult<Node> {
        self.require(Feature::ImplDecl)?;

        let mut builder = NodeBuilder::new(NodeKind::ImplDecl);
        builder.token(self.expect(TokenKind::Impl)?);
        builder.field("interface", self.expect_identifier()?);
        builder.token(self.expect(TokenKind::For)?);
        builder.field("type", self.parse_named_type()?);
        self.parse_method_block(&mut builder)?;
        self.finish(builder)
    }

    /// 拡張宣言を解析: `extension Type { fn ... }`
    fn parse_extension_decl(&mut self) -> ParseResult<Node> {
        self.require(Feature::ExtensionDecl)?;

        let mut builder = NodeBuilder::new(NodeKind::ExtensionDecl);
        builder.token(self.expect(TokenKind::Extension)?);
        builder.field("type", self.parse_named_type()?);
        self.parse_method_block(&mut builder)?;
        self.finish(builder)
    }

    /// `{ fn ... }` の関数宣言の並び
    fn parse_method_block(&mut self, builder: &mut NodeBuilder) -> ParseResult<()> {
        builder.token(self.expect(TokenKind::LeftBrace)?);

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let method = self.nested(|p| p.parse_function_decl())?;
            builder.field("method", method);
        }

        builder.token(self.expect(TokenKind::RightBrace)?);
        Ok(())
    }

    /// マクロ宣言を解析: `macro name(params) { ... }`
    fn parse_macro_decl(&mut self) -> ParseResult<Node> {
        self.require(Feature::MacroDecl)?;

        let mut builder = NodeBuilder::new(NodeKind::MacroDecl);
        builder.token(self.expect(TokenKind::Macro)?);
        builder.field("name", self.expect_identifier()?);
        self.parse_parameter_list(&mut builder)?;
        builder.field("body", self.parse_block()?);
        self.finish(builder)
    }

    /// import文を解析
    ///
    /// `import` の次のトークンで形を決める:
    /// - `import "path"`
    /// - `import { a, b } from "path"`
    /// - `import * as alias from "path"`
    fn parse_import(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Import);
        builder.token(self.expect(TokenKind::Import)?);

        match self.current_kind() {
            TokenKind::String => {}
            TokenKind::LeftBrace => {
                builder.token(self.advance());
                self.parse_separated(
                    &mut builder,
                    "name",
                    TokenKind::Comma,
                    TokenKind::RightBrace,
                    true,
                    |p| p.expect_identifier(),
                )?;
                builder.token(self.expect(TokenKind::RightBrace)?);
                builder.token(self.expect(TokenKind::From)?);
            }
            TokenKind::Star => {
                builder.token(self.advance());
                builder.token(self.expect(TokenKind::As)?);
                builder.field("alias", self.expect_identifier()?);
                builder.token(self.expect(TokenKind::From)?);
            }
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::String.describe(),
                    TokenKind::LeftBrace.describe(),
                    TokenKind::Star.describe(),
                ]));
            }
        }

        builder.field("path", self.expect_string()?);
        self.finish(builder)
    }

    /// export文を解析: `export (let | const | fn | struct | enum) ...`
    fn parse_export(&mut self) -> ParseResult<Node> {
        let mut builder = NodeBuilder::new(NodeKind::Export);
        builder.token(self.expect(TokenKind::Export)?);

        let declaration = match self.current_kind() {
            TokenKind::Let => self.parse_variable_decl()?,
            TokenKind::Const => self.parse_constant_decl()?,
            TokenKind::Fn => self.parse_function_decl()?,
            TokenKind::Struct => self.parse_struct_decl()?,
            TokenKind::Enum => self.parse_enum_decl()?,
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::Let.describe(),
                    TokenKind::Const.describe(),
                    TokenKind::Fn.describe(),
                    TokenKind::Struct.describe(),
                    TokenKind::Enum.describe(),
                ]));
            }
        };
        builder.field("declaration", declaration);
        self.finish(builder)
    }
}
