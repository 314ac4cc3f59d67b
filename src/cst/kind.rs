//! Node kinds and the field schema each kind must satisfy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a node field (`"left"`, `"body"`, ...)
pub type FieldName = &'static str;

/// The three families of the language plus the structural helper nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeFamily {
    Statement,
    Expression,
    Type,
    Structural,
}

/// Kind of a CST node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Structural
    SourceFile,
    Block,
    GenericParameters,
    GenericParameter,
    Parameter,
    FieldDeclaration,
    InterfaceMethod,
    MatchArm,
    ObjectField,
    Error,

    // Statements
    VariableDecl,
    ConstantDecl,
    FunctionDecl,
    StructDecl,
    EnumDecl,
    InterfaceDecl,
    ImplDecl,
    ExtensionDecl,
    MacroDecl,
    Import,
    Export,
    ExpressionStatement,
    If,
    For,
    Match,
    Return,
    Yield,
    Break,

    // Expressions
    Binary,
    Unary,
    Ternary,
    Assignment,
    Call,
    Member,
    Index,
    Async,
    Await,
    MacroCall,
    ArrayLiteral,
    ObjectLiteral,
    FunctionLiteral,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    Parenthesized,

    // Types
    Primitive,
    Union,
    Optional,
    Tuple,
    NamedType,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        use NodeKind::*;
        match self {
            SourceFile => "source_file",
            Block => "block",
            GenericParameters => "generic_parameters",
            GenericParameter => "generic_parameter",
            Parameter => "parameter",
            FieldDeclaration => "field_declaration",
            InterfaceMethod => "interface_method",
            MatchArm => "match_arm",
            ObjectField => "object_field",
            Error => "error",
            VariableDecl => "variable_decl",
            ConstantDecl => "constant_decl",
            FunctionDecl => "function_decl",
            StructDecl => "struct_decl",
            EnumDecl => "enum_decl",
            InterfaceDecl => "interface_decl",
            ImplDecl => "impl_decl",
            ExtensionDecl => "extension_decl",
            MacroDecl => "macro_decl",
            Import => "import",
            Export => "export",
            ExpressionStatement => "expression_statement",
            If => "if",
            For => "for",
            Match => "match",
            Return => "return",
            Yield => "yield",
            Break => "break",
            Binary => "binary",
            Unary => "unary",
            Ternary => "ternary",
            Assignment => "assignment",
            Call => "call",
            Member => "member",
            Index => "index",
            Async => "async",
            Await => "await",
            MacroCall => "macro_call",
            ArrayLiteral => "array_literal",
            ObjectLiteral => "object_literal",
            FunctionLiteral => "function_literal",
            Identifier => "identifier",
            IntegerLiteral => "integer_literal",
            FloatLiteral => "float_literal",
            StringLiteral => "string_literal",
            BooleanLiteral => "boolean_literal",
            NullLiteral => "null_literal",
            Parenthesized => "parenthesized",
            Primitive => "primitive",
            Union => "union",
            Optional => "optional",
            Tuple => "tuple",
            NamedType => "named_type",
        }
    }

    pub fn family(self) -> NodeFamily {
        use NodeKind::*;
        match self {
            VariableDecl | ConstantDecl | FunctionDecl | StructDecl | EnumDecl | InterfaceDecl
            | ImplDecl | ExtensionDecl | MacroDecl | Import | Export | ExpressionStatement | If
            | For | Match | Return | Yield | Break => NodeFamily::Statement,
            Binary | Unary | Ternary | Assignment | Call | Member | Index | Async | Await
            | MacroCall | ArrayLiteral | ObjectLiteral | FunctionLiteral | Identifier
            | IntegerLiteral | FloatLiteral | StringLiteral | BooleanLiteral | NullLiteral
            | Parenthesized => NodeFamily::Expression,
            Primitive | Union | Optional | Tuple | NamedType => NodeFamily::Type,
            SourceFile | Block | GenericParameters | GenericParameter | Parameter
            | FieldDeclaration | InterfaceMethod | MatchArm | ObjectField | Error => {
                NodeFamily::Structural
            }
        }
    }

    pub fn is_statement(self) -> bool {
        self.family() == NodeFamily::Statement
    }

    pub fn is_expression(self) -> bool {
        self.family() == NodeFamily::Expression
    }

    pub fn is_type(self) -> bool {
        self.family() == NodeFamily::Type
    }

    /// Kinds whose only content is a single token
    pub fn is_leaf(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Identifier
                | IntegerLiteral
                | FloatLiteral
                | StringLiteral
                | BooleanLiteral
                | NullLiteral
                | Primitive
                | NamedType
        )
    }

    /// Field schema for the kind. Error nodes have none.
    pub fn schema(self) -> Option<&'static Schema> {
        use NodeKind::*;
        let schema = match self {
            SourceFile | Block => &STATEMENTS,
            GenericParameters => &GENERIC_PARAMETERS,
            GenericParameter => &GENERIC_PARAMETER,
            Parameter => &PARAMETER,
            FieldDeclaration => &FIELD_DECLARATION,
            InterfaceMethod => &INTERFACE_METHOD,
            MatchArm => &MATCH_ARM,
            ObjectField => &OBJECT_FIELD,
            Error => return None,
            VariableDecl => &VARIABLE_DECL,
            ConstantDecl => &CONSTANT_DECL,
            FunctionDecl => &FUNCTION_DECL,
            StructDecl => &STRUCT_DECL,
            EnumDecl => &ENUM_DECL,
            InterfaceDecl => &INTERFACE_DECL,
            ImplDecl => &IMPL_DECL,
            ExtensionDecl => &EXTENSION_DECL,
            MacroDecl => &MACRO_DECL,
            Import => &IMPORT,
            Export => &EXPORT,
            ExpressionStatement | Parenthesized => &EXPRESSION,
            If => &IF,
            For => &FOR,
            Match => &MATCH,
            Return => &RETURN,
            Yield => &YIELD,
            Break => &EMPTY,
            Binary | Assignment => &BINARY,
            Unary => &UNARY,
            Ternary => &TERNARY,
            Call => &CALL,
            Member => &MEMBER,
            Index => &INDEX,
            Async | Await => &OPERAND,
            MacroCall => &MACRO_CALL,
            ArrayLiteral => &ARRAY_LITERAL,
            ObjectLiteral => &OBJECT_LITERAL,
            FunctionLiteral => &FUNCTION_LITERAL,
            Identifier | IntegerLiteral | FloatLiteral | StringLiteral | BooleanLiteral
            | NullLiteral | Primitive | NamedType => &LEAF,
            Union => &UNION,
            Optional => &OPTIONAL,
            Tuple => &TUPLE,
        };
        Some(schema)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many times a field may occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Optional,
    Many,
    AtLeastOne,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::One => count == 1,
            Arity::Optional => count <= 1,
            Arity::Many => true,
            Arity::AtLeastOne => count >= 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: FieldName,
    pub arity: Arity,
}

/// Cross-field rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly one of the fields is present
    ExactlyOne(&'static [FieldName]),
    /// At most one of the fields is present
    AtMostOne(&'static [FieldName]),
    /// Either all of the fields are present or none
    Together(&'static [FieldName]),
    /// The field occurs at least this many times
    MinCount(FieldName, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    pub constraints: &'static [Constraint],
}

impl Schema {
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}

const fn one(name: FieldName) -> FieldRule {
    FieldRule { name, arity: Arity::One }
}

const fn opt(name: FieldName) -> FieldRule {
    FieldRule { name, arity: Arity::Optional }
}

const fn many(name: FieldName) -> FieldRule {
    FieldRule { name, arity: Arity::Many }
}

const fn some(name: FieldName) -> FieldRule {
    FieldRule { name, arity: Arity::AtLeastOne }
}

const fn schema(fields: &'static [FieldRule]) -> Schema {
    Schema { fields, constraints: &[] }
}

static EMPTY: Schema = schema(&[]);
static LEAF: Schema = schema(&[one("token")]);
static STATEMENTS: Schema = schema(&[many("statement")]);
static EXPRESSION: Schema = schema(&[one("expression")]);
static OPERAND: Schema = schema(&[one("operand")]);

static GENERIC_PARAMETERS: Schema = schema(&[some("parameter")]);
static GENERIC_PARAMETER: Schema = schema(&[one("name"), many("bound")]);
static PARAMETER: Schema = schema(&[one("name"), opt("type"), opt("default")]);
static FIELD_DECLARATION: Schema = schema(&[one("name"), one("type")]);
static INTERFACE_METHOD: Schema = schema(&[one("name"), many("parameter"), opt("return_type")]);
static MATCH_ARM: Schema = schema(&[one("pattern"), one("body")]);
static OBJECT_FIELD: Schema = schema(&[one("key"), one("value")]);

static VARIABLE_DECL: Schema = schema(&[some("name"), opt("type"), one("value")]);
static CONSTANT_DECL: Schema = schema(&[one("name"), opt("type"), one("value")]);
static FUNCTION_DECL: Schema = schema(&[
    one("name"),
    opt("generics"),
    many("parameter"),
    opt("return_type"),
    one("body"),
]);
static STRUCT_DECL: Schema = schema(&[one("name"), many("field")]);
static ENUM_DECL: Schema = schema(&[one("name"), some("variant")]);
static INTERFACE_DECL: Schema = schema(&[one("name"), many("method")]);
static IMPL_DECL: Schema = schema(&[one("interface"), one("type"), many("method")]);
static EXTENSION_DECL: Schema = schema(&[one("type"), many("method")]);
static MACRO_DECL: Schema = schema(&[one("name"), many("parameter"), one("body")]);
static IMPORT: Schema = Schema {
    fields: &[many("name"), opt("alias"), one("path")],
    constraints: &[Constraint::AtMostOne(&["name", "alias"])],
};
static EXPORT: Schema = schema(&[one("declaration")]);
static IF: Schema = schema(&[one("condition"), one("then"), opt("else")]);
static FOR: Schema = Schema {
    fields: &[
        opt("init"),
        opt("condition"),
        opt("update"),
        opt("iterator"),
        one("body"),
    ],
    constraints: &[
        Constraint::ExactlyOne(&["condition", "iterator"]),
        Constraint::Together(&["init", "condition", "update"]),
    ],
};
static MATCH: Schema = schema(&[one("value"), many("arm")]);
static RETURN: Schema = schema(&[many("value")]);
static YIELD: Schema = schema(&[one("value")]);

static BINARY: Schema = schema(&[one("left"), one("operator"), one("right")]);
static UNARY: Schema = schema(&[one("operator"), one("operand")]);
static TERNARY: Schema = schema(&[one("condition"), one("consequence"), one("alternative")]);
static CALL: Schema = schema(&[one("function"), many("argument")]);
static MEMBER: Schema = schema(&[one("object"), one("property")]);
static INDEX: Schema = schema(&[one("object"), one("index")]);
static MACRO_CALL: Schema = schema(&[one("name"), many("argument")]);
static ARRAY_LITERAL: Schema = schema(&[many("element")]);
static OBJECT_LITERAL: Schema = schema(&[many("field")]);
static FUNCTION_LITERAL: Schema = Schema {
    fields: &[many("parameter"), opt("body"), opt("expression")],
    constraints: &[Constraint::ExactlyOne(&["body", "expression"])],
};

static UNION: Schema = Schema {
    fields: &[some("variant")],
    constraints: &[Constraint::MinCount("variant", 2)],
};
static OPTIONAL: Schema = schema(&[one("inner")]);
static TUPLE: Schema = schema(&[some("element")]);
