//! Expression nodes.
//!
//! Every node's leftmost token carries the trivia that precedes the node; a
//! node whose first token belongs to a child (`Selector`, `Call`, `Index`,
//! `Binary`) has no whitespace field of its own, the child provides it.

use crate::nodes::traits::{Codegen, CodegenState};
use crate::nodes::types::TypeExpr;
use crate::nodes::whitespace::Whitespace;

// ============================================================================
// Expression
// ============================================================================

/// Any expression in the supported Go subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'a> {
    Name(Name<'a>),
    BasicLit(BasicLit<'a>),
    Selector(Selector<'a>),
    Call(Call<'a>),
    Index(Index<'a>),
    Unary(Unary<'a>),
    Binary(Binary<'a>),
    Paren(Paren<'a>),
    CompositeLit(CompositeLit<'a>),
}

impl<'a> Codegen<'a> for Expression<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            Expression::Name(n) => n.codegen(state),
            Expression::BasicLit(l) => l.codegen(state),
            Expression::Selector(s) => s.codegen(state),
            Expression::Call(c) => c.codegen(state),
            Expression::Index(i) => i.codegen(state),
            Expression::Unary(u) => u.codegen(state),
            Expression::Binary(b) => b.codegen(state),
            Expression::Paren(p) => p.codegen(state),
            Expression::CompositeLit(c) => c.codegen(state),
        }
    }
}

/// An identifier.
///
/// `offset` is the byte position of the identifier in the original source,
/// `None` for names synthesized by a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name<'a> {
    /// Trivia before the identifier.
    pub ws: Whitespace<'a>,
    /// The identifier text.
    pub value: &'a str,
    /// Byte offset in the original source, if parsed from it.
    pub offset: Option<usize>,
}

impl<'a> Codegen<'a> for Name<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token(self.value);
    }
}

/// Literal kinds carried by [`BasicLit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    String,
    Rune,
}

/// An integer, float, string, or rune literal, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit<'a> {
    /// Trivia before the literal.
    pub ws: Whitespace<'a>,
    pub kind: LitKind,
    /// The literal text including quotes or prefixes.
    pub value: &'a str,
}

impl<'a> Codegen<'a> for BasicLit<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token(self.value);
    }
}

/// A field or method selection: `value.field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<'a> {
    pub value: Box<Expression<'a>>,
    /// Trivia before the dot.
    pub ws_dot: Whitespace<'a>,
    pub field: Name<'a>,
}

impl<'a> Codegen<'a> for Selector<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.value.codegen(state);
        self.ws_dot.codegen(state);
        state.add_token(".");
        self.field.codegen(state);
    }
}

/// A call: `func(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    pub func: Box<Expression<'a>>,
    /// Trivia before the opening paren.
    pub ws_lparen: Whitespace<'a>,
    pub args: Vec<Arg<'a>>,
    /// Trivia before the closing paren.
    pub ws_rparen: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Call<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.func.codegen(state);
        self.ws_lparen.codegen(state);
        state.add_token("(");
        self.args.codegen(state);
        self.ws_rparen.codegen(state);
        state.add_token(")");
    }
}

/// A single call argument, with an optional variadic `...` and the comma
/// that follows the argument, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg<'a> {
    pub value: Expression<'a>,
    /// Trivia before `...` when the argument is spread.
    pub ellipsis: Option<Whitespace<'a>>,
    pub comma: Option<Comma<'a>>,
}

impl<'a> Codegen<'a> for Arg<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.value.codegen(state);
        if let Some(ws) = &self.ellipsis {
            ws.codegen(state);
            state.add_token("...");
        }
        self.comma.codegen(state);
    }
}

/// An index expression: `value[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index<'a> {
    pub value: Box<Expression<'a>>,
    /// Trivia before the opening bracket.
    pub ws_lbracket: Whitespace<'a>,
    pub index: Box<Expression<'a>>,
    /// Trivia before the closing bracket.
    pub ws_rbracket: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Index<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.value.codegen(state);
        self.ws_lbracket.codegen(state);
        state.add_token("[");
        self.index.codegen(state);
        self.ws_rbracket.codegen(state);
        state.add_token("]");
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
    Xor,
    Deref,
    Ref,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Ref => "&",
        }
    }
}

/// A unary expression: `op operand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary<'a> {
    /// Trivia before the operator.
    pub ws: Whitespace<'a>,
    pub op: UnaryOp,
    pub operand: Box<Expression<'a>>,
}

impl<'a> Codegen<'a> for Unary<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token(self.op.as_str());
        self.operand.codegen(state);
    }
}

/// Binary operators, with Go's five precedence levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogOr,
    LogAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Quo,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Quo => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }

    /// Go binding strength, 1 (weakest, `||`) through 5 (strongest, `*`).
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::LogOr => 1,
            BinaryOp::LogAnd => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => 4,
            BinaryOp::Mul
            | BinaryOp::Quo
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => 5,
        }
    }
}

/// A binary expression: `left op right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary<'a> {
    pub left: Box<Expression<'a>>,
    /// Trivia before the operator.
    pub ws_op: Whitespace<'a>,
    pub op: BinaryOp,
    pub right: Box<Expression<'a>>,
}

impl<'a> Codegen<'a> for Binary<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.left.codegen(state);
        self.ws_op.codegen(state);
        state.add_token(self.op.as_str());
        self.right.codegen(state);
    }
}

/// A parenthesized expression: `(value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paren<'a> {
    /// Trivia before the opening paren.
    pub ws: Whitespace<'a>,
    pub value: Box<Expression<'a>>,
    /// Trivia before the closing paren.
    pub ws_rparen: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Paren<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("(");
        self.value.codegen(state);
        self.ws_rparen.codegen(state);
        state.add_token(")");
    }
}

/// A composite literal: `T{elements}`.
///
/// The type is absent for literals nested inside another composite literal
/// where Go allows it to be elided (`[]Point{{1, 2}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLit<'a> {
    pub ty: Option<Box<TypeExpr<'a>>>,
    /// Trivia before the opening brace (after an elided type, the trivia
    /// before the brace itself).
    pub ws_lbrace: Whitespace<'a>,
    pub elements: Vec<KeyedElement<'a>>,
    /// Trivia before the closing brace.
    pub ws_rbrace: Whitespace<'a>,
}

impl<'a> Codegen<'a> for CompositeLit<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ty.codegen(state);
        self.ws_lbrace.codegen(state);
        state.add_token("{");
        self.elements.codegen(state);
        self.ws_rbrace.codegen(state);
        state.add_token("}");
    }
}

/// One element of a composite literal, optionally keyed.
///
/// The key's trailing trivia (before the `:`) is the second half of the
/// tuple. Struct field keys parse as plain [`Name`]s; they can never be
/// selectors, so field-access rewrites do not touch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedElement<'a> {
    pub key: Option<(Expression<'a>, Whitespace<'a>)>,
    pub value: Expression<'a>,
    pub comma: Option<Comma<'a>>,
}

impl<'a> Codegen<'a> for KeyedElement<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if let Some((key, ws_colon)) = &self.key {
            key.codegen(state);
            ws_colon.codegen(state);
            state.add_token(":");
        }
        self.value.codegen(state);
        self.comma.codegen(state);
    }
}

/// A comma with its leading trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comma<'a> {
    /// Trivia before the comma.
    pub ws: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Comma<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token(",");
    }
}
