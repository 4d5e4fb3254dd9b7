//! Statement nodes.
//!
//! A [`Statement`] is a line-shaped wrapper: it owns the blank and comment
//! lines above it, its own indentation, the statement proper, the semicolon
//! that terminated it (explicit, virtual, or absent), and the end-of-line
//! trivia. Rewrites that replace one statement with another move the wrapper
//! fields across unchanged, which is what keeps comments anchored.

use crate::nodes::expression::{Comma, Expression};
use crate::nodes::traits::{Codegen, CodegenState};
use crate::nodes::types::{FieldName, TypeExpr};
use crate::nodes::whitespace::{EmptyLine, SimpleWhitespace, TrailingWhitespace, Whitespace};

// ============================================================================
// Statement Wrapper
// ============================================================================

/// One statement with its surrounding line trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Blank and comment-only lines above the statement.
    pub leading_lines: Vec<EmptyLine<'a>>,
    /// Indentation of the statement's first line.
    pub indent: SimpleWhitespace<'a>,
    pub kind: StatementKind<'a>,
    pub semicolon: Semicolon<'a>,
    /// End-of-line trivia after the statement, when the statement ends its
    /// line. `None` when something else follows on the same line.
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for Statement<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        self.kind.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

/// The statement forms of the supported Go subset.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind<'a> {
    Simple(SimpleStmt<'a>),
    Var(VarDecl<'a>),
    Return(Return<'a>),
    If(If<'a>),
    For(For<'a>),
    Block(Block<'a>),
    Defer(Defer<'a>),
    Go(Go<'a>),
    Break(Break<'a>),
    Continue(Continue<'a>),
}

impl<'a> Codegen<'a> for StatementKind<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            StatementKind::Simple(s) => s.codegen(state),
            StatementKind::Var(v) => v.codegen(state),
            StatementKind::Return(r) => r.codegen(state),
            StatementKind::If(i) => i.codegen(state),
            StatementKind::For(f) => f.codegen(state),
            StatementKind::Block(b) => b.codegen(state),
            StatementKind::Defer(d) => d.codegen(state),
            StatementKind::Go(g) => g.codegen(state),
            StatementKind::Break(b) => b.codegen(state),
            StatementKind::Continue(c) => c.codegen(state),
        }
    }
}

/// A statement terminator.
///
/// Go's scanner inserts semicolons at line ends; those virtual semicolons
/// have no text to regenerate. A statement directly before `}` has no
/// terminator at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Semicolon<'a> {
    /// A literal `;` in the source, with the trivia before it.
    Explicit { ws: Whitespace<'a> },
    /// Inserted by automatic semicolon insertion; regenerates to nothing.
    Virtual,
    /// No terminator.
    None,
}

impl<'a> Codegen<'a> for Semicolon<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            Semicolon::Explicit { ws } => {
                ws.codegen(state);
                state.add_token(";");
            }
            Semicolon::Virtual | Semicolon::None => {}
        }
    }
}

// ============================================================================
// Simple Statements
// ============================================================================

/// Statements that may also appear in `if` and `for` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleStmt<'a> {
    Expr(Expression<'a>),
    Assign(Assign<'a>),
    IncDec(IncDec<'a>),
}

impl<'a> Codegen<'a> for SimpleStmt<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            SimpleStmt::Expr(e) => e.codegen(state),
            SimpleStmt::Assign(a) => a.codegen(state),
            SimpleStmt::IncDec(i) => i.codegen(state),
        }
    }
}

/// Assignment operators, including `:=` and the compound forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::QuoAssign => "/=",
            AssignOp::RemAssign => "%=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
            AssignOp::AndNotAssign => "&^=",
        }
    }
}

/// An assignment or short variable declaration.
///
/// Targets and values are comma-separated lists; each element carries the
/// comma that follows it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign<'a> {
    pub targets: Vec<Element<'a>>,
    /// Trivia before the operator.
    pub ws_op: Whitespace<'a>,
    pub op: AssignOp,
    pub values: Vec<Element<'a>>,
}

impl<'a> Codegen<'a> for Assign<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.targets.codegen(state);
        self.ws_op.codegen(state);
        state.add_token(self.op.as_str());
        self.values.codegen(state);
    }
}

/// One element of an expression list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub value: Expression<'a>,
    pub comma: Option<Comma<'a>>,
}

impl<'a> Codegen<'a> for Element<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.value.codegen(state);
        self.comma.codegen(state);
    }
}

/// `++` or `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

/// An increment or decrement statement: `target++`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncDec<'a> {
    pub target: Expression<'a>,
    /// Trivia before the operator.
    pub ws_op: Whitespace<'a>,
    pub op: IncDecOp,
}

impl<'a> Codegen<'a> for IncDec<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.target.codegen(state);
        self.ws_op.codegen(state);
        state.add_token(self.op.as_str());
    }
}

// ============================================================================
// Control Flow
// ============================================================================

/// A `return` statement with zero or more values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub values: Vec<Element<'a>>,
}

impl<'a> Codegen<'a> for Return<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("return");
        self.values.codegen(state);
    }
}

/// An `if` statement, optionally with an init statement and an `else` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If<'a> {
    /// Trivia before the keyword. Empty at a line start; holds the space
    /// after `else` in an `else if` chain.
    pub kw_ws: Whitespace<'a>,
    /// Init statement and its terminator. The terminator is usually an
    /// explicit `;` but can be virtual when the header breaks across lines.
    pub init: Option<(SimpleStmt<'a>, Semicolon<'a>)>,
    pub cond: Expression<'a>,
    pub block: Block<'a>,
    pub else_: Option<Else<'a>>,
}

impl<'a> Codegen<'a> for If<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("if");
        if let Some((init, semi)) = &self.init {
            init.codegen(state);
            semi.codegen(state);
        }
        self.cond.codegen(state);
        self.block.codegen(state);
        self.else_.codegen(state);
    }
}

/// The `else` arm of an `if` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Else<'a> {
    /// Trivia between the closing brace and `else`.
    pub ws: Whitespace<'a>,
    pub body: ElseBody<'a>,
}

impl<'a> Codegen<'a> for Else<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws.codegen(state);
        state.add_token("else");
        match &self.body {
            ElseBody::Block(b) => b.codegen(state),
            ElseBody::If(i) => i.codegen(state),
        }
    }
}

/// What follows `else`: a block or a chained `if`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseBody<'a> {
    Block(Block<'a>),
    If(Box<If<'a>>),
}

/// A `for` statement in any of its clause forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct For<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub clause: ForClause<'a>,
    pub block: Block<'a>,
}

impl<'a> Codegen<'a> for For<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("for");
        self.clause.codegen(state);
        self.block.codegen(state);
    }
}

/// The header of a `for` statement.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForClause<'a> {
    /// `for { ... }`
    Infinite,
    /// `for cond { ... }`
    Cond(Expression<'a>),
    /// `for init; cond; post { ... }`, each part optional. The separators
    /// are usually explicit semicolons but can be virtual when the header
    /// breaks across lines.
    ThreeClause {
        init: Option<SimpleStmt<'a>>,
        semi1: Semicolon<'a>,
        cond: Option<Expression<'a>>,
        semi2: Semicolon<'a>,
        post: Option<SimpleStmt<'a>>,
    },
    /// `for targets := range value { ... }` or `for range value { ... }`.
    Range {
        assign: Option<RangeAssign<'a>>,
        /// Trivia before the `range` keyword.
        ws_range: Whitespace<'a>,
        value: Expression<'a>,
    },
}

impl<'a> Codegen<'a> for ForClause<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            ForClause::Infinite => {}
            ForClause::Cond(cond) => cond.codegen(state),
            ForClause::ThreeClause {
                init,
                semi1,
                cond,
                semi2,
                post,
            } => {
                init.codegen(state);
                semi1.codegen(state);
                cond.codegen(state);
                semi2.codegen(state);
                post.codegen(state);
            }
            ForClause::Range {
                assign,
                ws_range,
                value,
            } => {
                assign.codegen(state);
                ws_range.codegen(state);
                state.add_token("range");
                value.codegen(state);
            }
        }
    }
}

/// The assignment half of a range clause: `k, v :=` or `i =`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeAssign<'a> {
    pub targets: Vec<Element<'a>>,
    /// Trivia before the operator.
    pub ws_op: Whitespace<'a>,
    pub op: AssignOp,
}

impl<'a> Codegen<'a> for RangeAssign<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.targets.codegen(state);
        self.ws_op.codegen(state);
        state.add_token(self.op.as_str());
    }
}

/// A braced statement block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Trivia before the opening brace.
    pub ws_lbrace: Whitespace<'a>,
    pub body: Vec<Statement<'a>>,
    /// Blank and comment lines between the last statement and the closing
    /// brace.
    pub footer: Vec<EmptyLine<'a>>,
    /// Indentation of the closing brace.
    pub ws_rbrace: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for Block<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws_lbrace.codegen(state);
        state.add_token("{");
        self.body.codegen(state);
        self.footer.codegen(state);
        self.ws_rbrace.codegen(state);
        state.add_token("}");
    }
}

/// A `defer` statement. The expression is a call; the parser enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defer<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub call: Expression<'a>,
}

impl<'a> Codegen<'a> for Defer<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("defer");
        self.call.codegen(state);
    }
}

/// A `go` statement. The expression is a call; the parser enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Go<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub call: Expression<'a>,
}

impl<'a> Codegen<'a> for Go<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("go");
        self.call.codegen(state);
    }
}

/// A `break` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Break<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Break<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("break");
    }
}

/// A `continue` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continue<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
}

impl<'a> Codegen<'a> for Continue<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("continue");
    }
}

// ============================================================================
// Declarations Usable as Statements
// ============================================================================

/// Which declaration keyword introduced a [`VarDecl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKeyword {
    Var,
    Const,
}

impl VarKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKeyword::Var => "var",
            VarKeyword::Const => "const",
        }
    }
}

/// A `var` or `const` declaration, single or grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub keyword: VarKeyword,
    pub body: VarBody<'a>,
}

impl<'a> Codegen<'a> for VarDecl<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token(self.keyword.as_str());
        self.body.codegen(state);
    }
}

/// The body of a `var`/`const` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarBody<'a> {
    Single(VarSpec<'a>),
    Group {
        /// Trivia before the opening paren.
        ws_lparen: Whitespace<'a>,
        specs: Vec<VarSpecLine<'a>>,
        /// Blank and comment lines before the closing paren.
        footer: Vec<EmptyLine<'a>>,
        /// Indentation of the closing paren.
        ws_rparen: SimpleWhitespace<'a>,
    },
}

impl<'a> Codegen<'a> for VarBody<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            VarBody::Single(spec) => spec.codegen(state),
            VarBody::Group {
                ws_lparen,
                specs,
                footer,
                ws_rparen,
            } => {
                ws_lparen.codegen(state);
                state.add_token("(");
                specs.codegen(state);
                footer.codegen(state);
                ws_rparen.codegen(state);
                state.add_token(")");
            }
        }
    }
}

/// One spec of a `var`/`const` declaration: names, optional type, optional
/// initializer. A bare name list is a `const` continuation spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec<'a> {
    pub names: Vec<FieldName<'a>>,
    pub ty: Option<TypeExpr<'a>>,
    pub init: Option<VarInit<'a>>,
}

impl<'a> Codegen<'a> for VarSpec<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.names.codegen(state);
        self.ty.codegen(state);
        self.init.codegen(state);
    }
}

/// The `= values` half of a var spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInit<'a> {
    /// Trivia before the `=`.
    pub ws_eq: Whitespace<'a>,
    pub values: Vec<Element<'a>>,
}

impl<'a> Codegen<'a> for VarInit<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.ws_eq.codegen(state);
        state.add_token("=");
        self.values.codegen(state);
    }
}

/// One line of a grouped `var ( ... )` declaration, with the same line
/// trivia shape as a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpecLine<'a> {
    pub leading_lines: Vec<EmptyLine<'a>>,
    pub indent: SimpleWhitespace<'a>,
    pub spec: VarSpec<'a>,
    pub semicolon: Semicolon<'a>,
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for VarSpecLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        self.spec.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
