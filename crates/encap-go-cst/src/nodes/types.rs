//! Type expression nodes.
//!
//! Types appear in struct declarations, function signatures, var specs, and
//! composite literals. Function parameter lists live here too: Go treats a
//! signature as part of the function's type.

use crate::nodes::expression::{BasicLit, Comma, Expression, Name};
use crate::nodes::statement::Semicolon;
use crate::nodes::traits::{Codegen, CodegenState};
use crate::nodes::whitespace::{EmptyLine, SimpleWhitespace, TrailingWhitespace, Whitespace};

// ============================================================================
// Type Expressions
// ============================================================================

/// Any type in the supported Go subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    Named(NamedType<'a>),
    Pointer(PointerType<'a>),
    Slice(SliceType<'a>),
    Array(ArrayType<'a>),
    Map(MapType<'a>),
    Struct(StructType<'a>),
    Variadic(VariadicType<'a>),
}

impl<'a> Codegen<'a> for TypeExpr<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            TypeExpr::Named(t) => t.codegen(state),
            TypeExpr::Pointer(t) => t.codegen(state),
            TypeExpr::Slice(t) => t.codegen(state),
            TypeExpr::Array(t) => t.codegen(state),
            TypeExpr::Map(t) => t.codegen(state),
            TypeExpr::Struct(t) => t.codegen(state),
            TypeExpr::Variadic(t) => t.codegen(state),
        }
    }
}

/// A named type, optionally qualified: `User` or `color.RGBA`.
///
/// For a qualified name the tuple holds the package identifier and the
/// trivia before the dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType<'a> {
    pub package: Option<(Name<'a>, Whitespace<'a>)>,
    pub name: Name<'a>,
}

impl<'a> Codegen<'a> for NamedType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if let Some((package, ws_dot)) = &self.package {
            package.codegen(state);
            ws_dot.codegen(state);
            state.add_token(".");
        }
        self.name.codegen(state);
    }
}

/// A pointer type: `*T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerType<'a> {
    /// Trivia before the star.
    pub ws: Whitespace<'a>,
    pub elem: Box<TypeExpr<'a>>,
}

impl<'a> Codegen<'a> for PointerType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("*");
        self.elem.codegen(state);
    }
}

/// A slice type: `[]T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceType<'a> {
    /// Trivia before the opening bracket.
    pub ws: Whitespace<'a>,
    /// Trivia between the brackets.
    pub ws_rbracket: Whitespace<'a>,
    pub elem: Box<TypeExpr<'a>>,
}

impl<'a> Codegen<'a> for SliceType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("[");
        self.ws_rbracket.codegen(state);
        state.add_token("]");
        self.elem.codegen(state);
    }
}

/// An array type: `[N]T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType<'a> {
    /// Trivia before the opening bracket.
    pub ws: Whitespace<'a>,
    pub len: Box<Expression<'a>>,
    /// Trivia before the closing bracket.
    pub ws_rbracket: Whitespace<'a>,
    pub elem: Box<TypeExpr<'a>>,
}

impl<'a> Codegen<'a> for ArrayType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("[");
        self.len.codegen(state);
        self.ws_rbracket.codegen(state);
        state.add_token("]");
        self.elem.codegen(state);
    }
}

/// A map type: `map[K]V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType<'a> {
    /// Trivia before the `map` keyword.
    pub ws: Whitespace<'a>,
    /// Trivia before the opening bracket.
    pub ws_lbracket: Whitespace<'a>,
    pub key: Box<TypeExpr<'a>>,
    /// Trivia before the closing bracket.
    pub ws_rbracket: Whitespace<'a>,
    pub value: Box<TypeExpr<'a>>,
}

impl<'a> Codegen<'a> for MapType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("map");
        self.ws_lbracket.codegen(state);
        state.add_token("[");
        self.key.codegen(state);
        self.ws_rbracket.codegen(state);
        state.add_token("]");
        self.value.codegen(state);
    }
}

/// A variadic parameter type: `...T`. Valid only as the final parameter
/// type of a signature; the parser enforces the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariadicType<'a> {
    /// Trivia before the ellipsis.
    pub ws: Whitespace<'a>,
    pub elem: Box<TypeExpr<'a>>,
}

impl<'a> Codegen<'a> for VariadicType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("...");
        self.elem.codegen(state);
    }
}

// ============================================================================
// Struct Types
// ============================================================================

/// A struct type with its field block: `struct { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType<'a> {
    /// Trivia before the `struct` keyword.
    pub ws: Whitespace<'a>,
    /// Trivia before the opening brace.
    pub ws_lbrace: Whitespace<'a>,
    pub fields: Vec<FieldLine<'a>>,
    /// Blank and comment lines between the last field and the closing brace.
    pub footer: Vec<EmptyLine<'a>>,
    /// Indentation of the closing brace.
    pub ws_rbrace: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for StructType<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("struct");
        self.ws_lbrace.codegen(state);
        state.add_token("{");
        self.fields.codegen(state);
        self.footer.codegen(state);
        self.ws_rbrace.codegen(state);
        state.add_token("}");
    }
}

/// One line of a struct field block.
///
/// `names` is empty for an embedded field (`io.Reader`, `*Base`). Multiple
/// names share one type (`X, Y int`). The line owns its leading blank and
/// comment lines, its indentation, and its end-of-line trivia, same as a
/// statement does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine<'a> {
    pub leading_lines: Vec<EmptyLine<'a>>,
    pub indent: SimpleWhitespace<'a>,
    pub names: Vec<FieldName<'a>>,
    pub ty: TypeExpr<'a>,
    /// Field tag literal, if present.
    pub tag: Option<BasicLit<'a>>,
    pub semicolon: Semicolon<'a>,
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for FieldLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        self.names.codegen(state);
        self.ty.codegen(state);
        self.tag.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

/// One name in a field line's name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName<'a> {
    pub name: Name<'a>,
    pub comma: Option<Comma<'a>>,
}

impl<'a> Codegen<'a> for FieldName<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.name.codegen(state);
        self.comma.codegen(state);
    }
}

// ============================================================================
// Signatures
// ============================================================================

/// A parenthesized parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamList<'a> {
    /// Trivia before the opening paren.
    pub ws_lparen: Whitespace<'a>,
    pub params: Vec<Param<'a>>,
    /// Trivia before the closing paren.
    pub ws_rparen: Whitespace<'a>,
}

impl<'a> Codegen<'a> for ParamList<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws_lparen.codegen(state);
        state.add_token("(");
        self.params.codegen(state);
        self.ws_rparen.codegen(state);
        state.add_token(")");
    }
}

/// One parameter.
///
/// In `a, b int` only the last parameter carries the type name `int`; the
/// earlier identifiers parse as unnamed parameters of a like-named type.
/// That reading regenerates the source exactly without resolving which
/// identifiers are names, which would need type information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param<'a> {
    pub name: Option<Name<'a>>,
    pub ty: TypeExpr<'a>,
    pub comma: Option<Comma<'a>>,
}

impl<'a> Codegen<'a> for Param<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.name.codegen(state);
        self.ty.codegen(state);
        self.comma.codegen(state);
    }
}

/// A function's result spec: a single bare type or a parenthesized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results<'a> {
    Single(TypeExpr<'a>),
    Tuple(ParamList<'a>),
}

impl<'a> Codegen<'a> for Results<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            Results::Single(ty) => ty.codegen(state),
            Results::Tuple(list) => list.codegen(state),
        }
    }
}
