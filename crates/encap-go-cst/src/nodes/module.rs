//! Module (file) level nodes: the package clause and top-level declarations.

use crate::nodes::expression::{BasicLit, Name};
use crate::nodes::statement::{Block, Semicolon, VarDecl};
use crate::nodes::traits::{Codegen, CodegenState};
use crate::nodes::types::{ParamList, Results, TypeExpr};
use crate::nodes::whitespace::{EmptyLine, SimpleWhitespace, TrailingWhitespace, Whitespace};

// ============================================================================
// Module
// ============================================================================

/// A complete Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module<'a> {
    pub package: PackageClause<'a>,
    pub decls: Vec<TopLevel<'a>>,
    /// Blank and comment lines after the last declaration.
    pub footer: Vec<EmptyLine<'a>>,
    /// Whitespace on a final line that has no newline.
    pub eof_ws: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for Module<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.package.codegen(state);
        self.decls.codegen(state);
        self.footer.codegen(state);
        self.eof_ws.codegen(state);
    }
}

/// The `package name` clause, with the file header trivia above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageClause<'a> {
    /// License headers, build tags, and blank lines above the clause.
    pub leading_lines: Vec<EmptyLine<'a>>,
    pub indent: SimpleWhitespace<'a>,
    pub name: Name<'a>,
    pub semicolon: Semicolon<'a>,
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for PackageClause<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        state.add_token("package");
        self.name.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

// ============================================================================
// Top-level Declarations
// ============================================================================

/// One top-level declaration with its line trivia, same shape as a
/// statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevel<'a> {
    pub leading_lines: Vec<EmptyLine<'a>>,
    pub indent: SimpleWhitespace<'a>,
    pub decl: Decl<'a>,
    pub semicolon: Semicolon<'a>,
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for TopLevel<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        self.decl.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

/// The top-level declaration forms.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl<'a> {
    Import(ImportDecl<'a>),
    Func(FuncDecl<'a>),
    Type(TypeDecl<'a>),
    Var(VarDecl<'a>),
}

impl<'a> Codegen<'a> for Decl<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            Decl::Import(i) => i.codegen(state),
            Decl::Func(f) => f.codegen(state),
            Decl::Type(t) => t.codegen(state),
            Decl::Var(v) => v.codegen(state),
        }
    }
}

// ============================================================================
// Imports
// ============================================================================

/// An `import` declaration, single or grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub body: ImportBody<'a>,
}

impl<'a> Codegen<'a> for ImportDecl<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("import");
        self.body.codegen(state);
    }
}

/// The body of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBody<'a> {
    Single(ImportSpec<'a>),
    Group {
        /// Trivia before the opening paren.
        ws_lparen: Whitespace<'a>,
        specs: Vec<ImportLine<'a>>,
        /// Blank and comment lines before the closing paren.
        footer: Vec<EmptyLine<'a>>,
        /// Indentation of the closing paren.
        ws_rparen: SimpleWhitespace<'a>,
    },
}

impl<'a> Codegen<'a> for ImportBody<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self {
            ImportBody::Single(spec) => spec.codegen(state),
            ImportBody::Group {
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

/// One import path with its optional alias (`f "fmt"`, `_ "pkg"`,
/// `. "pkg"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec<'a> {
    pub alias: Option<Name<'a>>,
    pub path: BasicLit<'a>,
}

impl<'a> Codegen<'a> for ImportSpec<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.alias.codegen(state);
        self.path.codegen(state);
    }
}

/// One line of a grouped import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine<'a> {
    pub leading_lines: Vec<EmptyLine<'a>>,
    pub indent: SimpleWhitespace<'a>,
    pub spec: ImportSpec<'a>,
    pub semicolon: Semicolon<'a>,
    pub trailing: Option<TrailingWhitespace<'a>>,
}

impl<'a> Codegen<'a> for ImportLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.leading_lines.codegen(state);
        self.indent.codegen(state);
        self.spec.codegen(state);
        self.semicolon.codegen(state);
        self.trailing.codegen(state);
    }
}

// ============================================================================
// Functions and Types
// ============================================================================

/// A function or method declaration. A method carries a receiver list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub receiver: Option<ParamList<'a>>,
    pub name: Name<'a>,
    pub params: ParamList<'a>,
    pub results: Option<Results<'a>>,
    pub body: Block<'a>,
}

impl<'a> Codegen<'a> for FuncDecl<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("func");
        self.receiver.codegen(state);
        self.name.codegen(state);
        self.params.codegen(state);
        self.results.codegen(state);
        self.body.codegen(state);
    }
}

/// A `type Name <type>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl<'a> {
    /// Trivia before the keyword.
    pub kw_ws: Whitespace<'a>,
    pub name: Name<'a>,
    pub ty: TypeExpr<'a>,
}

impl<'a> Codegen<'a> for TypeDecl<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.kw_ws.codegen(state);
        state.add_token("type");
        self.name.codegen(state);
        self.ty.codegen(state);
    }
}
