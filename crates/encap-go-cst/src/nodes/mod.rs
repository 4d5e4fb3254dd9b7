//! CST node definitions.
//!
//! Nodes own every byte of the source between them: each node's leftmost
//! token carries the trivia that precedes it, statements and declaration
//! lines carry their line trivia, and the module carries what is left at end
//! of file. Regenerating an unmodified tree therefore reproduces the input
//! byte for byte.

mod expression;
mod module;
mod statement;
mod traits;
mod types;
mod whitespace;

pub use expression::{
    Arg, BasicLit, Binary, BinaryOp, Call, Comma, CompositeLit, Expression, Index, KeyedElement,
    LitKind, Name, Paren, Selector, Unary, UnaryOp,
};
pub use module::{
    Decl, FuncDecl, ImportBody, ImportDecl, ImportLine, ImportSpec, Module, PackageClause,
    TopLevel, TypeDecl,
};
pub use statement::{
    Assign, AssignOp, Block, Break, Continue, Defer, Element, Else, ElseBody, For, ForClause, Go,
    If, IncDec, IncDecOp, RangeAssign, Return, Semicolon, SimpleStmt, Statement, StatementKind,
    VarBody, VarDecl, VarInit, VarKeyword, VarSpec, VarSpecLine,
};
pub use traits::{Codegen, CodegenState};
pub use types::{
    ArrayType, FieldLine, FieldName, MapType, NamedType, Param, ParamList, PointerType, Results,
    SliceType, StructType, TypeExpr, VariadicType,
};
pub use whitespace::{
    Comment, EmptyLine, Newline, SimpleWhitespace, TrailingWhitespace, Whitespace,
};
