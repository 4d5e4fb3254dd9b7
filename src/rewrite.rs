//! The field-access rewrite engine.
//!
//! Takes ownership of a parsed [`Module`] and rebuilds it with registered
//! field accesses replaced by accessor calls:
//!
//! - a read `x.Field` becomes `x.GetField()`,
//! - a write statement `x.Field = v` becomes `x.SetField(v)`.
//!
//! Everything else is reconstructed unchanged, field by field, so trivia
//! stays where the parser put it. An expression is rewritten under one of
//! two positions: `Read`, where a selector of a registered field is wrapped
//! in a getter call, and `AssignTarget`, where the outermost selector must
//! stay assignable and only its receiver chain is rewritten. Writes that do
//! not match the setter shape (compound assignments, `++`/`--`, multiple
//! targets, range targets) keep their shape; the driver reports them as
//! leftover writes after verification.
//!
//! Type positions are never rewritten. An array length like `[N]T` must
//! stay a constant expression, and struct field names in type declarations
//! are declarations, not accesses.

use encap_core::{EncapError, RewriteCounts, Warning};
use encap_go_cst::{
    Arg, Assign, AssignOp, Binary, Block, Call, CompositeLit, Decl, Defer, Element, Else, ElseBody,
    Expression, For, ForClause, FuncDecl, Go, If, IncDec, Index, KeyedElement, Module, Name, Paren,
    RangeAssign, Return, Selector, SimpleStmt, Statement, StatementKind, TopLevel, TypeExpr, Unary,
    VarBody, VarDecl, VarInit, VarSpec, VarSpecLine, Whitespace,
};
use thiserror::Error;

use crate::comments::{CommentAudit, CommentLoss, CommentPolicy, Disposition};
use crate::registry::AccessorRegistry;

// ============================================================================
// Public API
// ============================================================================

/// Counts and warnings from one rewrite pass.
#[derive(Debug, Clone, Default)]
pub struct RewriteSummary {
    pub counts: RewriteCounts,
    pub warnings: Vec<Warning>,
}

/// A rewrite pass failure. The input tree is consumed either way; callers
/// re-parse if they want to retry with another policy.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    CommentLoss(#[from] CommentLoss),
}

impl From<RewriteError> for EncapError {
    fn from(err: RewriteError) -> Self {
        match err {
            RewriteError::CommentLoss(loss) => EncapError::CommentLoss { text: loss.text },
        }
    }
}

/// Rewrites every registered field access in `module`.
///
/// The returned tree borrows from the original source and from `registry`
/// (synthesized accessor names point into it). Regenerate it with
/// [`encap_go_cst::Codegen`].
///
/// # Errors
///
/// Returns [`RewriteError::CommentLoss`] when a rewrite would drop a
/// comment and the policy is [`CommentPolicy::Fail`].
pub fn rewrite_module<'a>(
    module: Module<'a>,
    registry: &'a AccessorRegistry,
    policy: CommentPolicy,
) -> Result<(Module<'a>, RewriteSummary), RewriteError> {
    let mut rewriter = Rewriter {
        registry,
        audit: CommentAudit::new(policy),
        counts: RewriteCounts::default(),
    };
    let module = rewriter.module(module)?;
    let summary = RewriteSummary {
        counts: rewriter.counts,
        warnings: rewriter.audit.take_warnings(),
    };
    Ok((module, summary))
}

// ============================================================================
// Rewriter
// ============================================================================

/// How the expression being rewritten is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// The expression's value is read; registered selectors become getter
    /// calls.
    Read,
    /// The expression is assigned to; the outermost selector stays
    /// assignable and only receiver chains are rewritten.
    AssignTarget,
}

struct Rewriter<'a> {
    registry: &'a AccessorRegistry,
    audit: CommentAudit,
    counts: RewriteCounts,
}

impl<'a> Rewriter<'a> {
    // ------------------------------------------------------------------
    // Module level
    // ------------------------------------------------------------------

    fn module(&mut self, module: Module<'a>) -> Result<Module<'a>, RewriteError> {
        let Module { package, decls, footer, eof_ws } = module;
        let decls = decls
            .into_iter()
            .map(|decl| self.top_level(decl))
            .collect::<Result<_, _>>()?;
        Ok(Module { package, decls, footer, eof_ws })
    }

    fn top_level(&mut self, top: TopLevel<'a>) -> Result<TopLevel<'a>, RewriteError> {
        let TopLevel { leading_lines, indent, decl, semicolon, trailing } = top;
        let decl = match decl {
            Decl::Import(import) => Decl::Import(import),
            Decl::Func(func) => Decl::Func(self.func_decl(func)?),
            Decl::Type(ty) => Decl::Type(ty),
            Decl::Var(var) => Decl::Var(self.var_decl(var)?),
        };
        Ok(TopLevel { leading_lines, indent, decl, semicolon, trailing })
    }

    fn func_decl(&mut self, func: FuncDecl<'a>) -> Result<FuncDecl<'a>, RewriteError> {
        let FuncDecl { kw_ws, receiver, name, params, results, body } = func;
        let body = self.block(body)?;
        Ok(FuncDecl { kw_ws, receiver, name, params, results, body })
    }

    fn var_decl(&mut self, decl: VarDecl<'a>) -> Result<VarDecl<'a>, RewriteError> {
        let VarDecl { kw_ws, keyword, body } = decl;
        let body = match body {
            VarBody::Single(spec) => VarBody::Single(self.var_spec(spec)?),
            VarBody::Group { ws_lparen, specs, footer, ws_rparen } => VarBody::Group {
                ws_lparen,
                specs: specs
                    .into_iter()
                    .map(|line| {
                        let VarSpecLine { leading_lines, indent, spec, semicolon, trailing } = line;
                        Ok(VarSpecLine {
                            leading_lines,
                            indent,
                            spec: self.var_spec(spec)?,
                            semicolon,
                            trailing,
                        })
                    })
                    .collect::<Result<_, RewriteError>>()?,
                footer,
                ws_rparen,
            },
        };
        Ok(VarDecl { kw_ws, keyword, body })
    }

    fn var_spec(&mut self, spec: VarSpec<'a>) -> Result<VarSpec<'a>, RewriteError> {
        let VarSpec { names, ty, init } = spec;
        let init = match init {
            Some(VarInit { ws_eq, values }) => Some(VarInit {
                ws_eq,
                values: self.elements(values, Position::Read)?,
            }),
            None => None,
        };
        Ok(VarSpec { names, ty, init })
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self, block: Block<'a>) -> Result<Block<'a>, RewriteError> {
        let Block { ws_lbrace, body, footer, ws_rbrace } = block;
        let body = body
            .into_iter()
            .map(|stmt| self.statement(stmt))
            .collect::<Result<_, _>>()?;
        Ok(Block { ws_lbrace, body, footer, ws_rbrace })
    }

    /// Rewrites one statement. The line trivia wrapper is carried over
    /// untouched even when the statement kind is replaced, which is what
    /// keeps leading and trailing comments anchored.
    fn statement(&mut self, stmt: Statement<'a>) -> Result<Statement<'a>, RewriteError> {
        let Statement { leading_lines, indent, kind, semicolon, trailing } = stmt;
        let kind = self.statement_kind(kind)?;
        Ok(Statement { leading_lines, indent, kind, semicolon, trailing })
    }

    fn statement_kind(&mut self, kind: StatementKind<'a>) -> Result<StatementKind<'a>, RewriteError> {
        match kind {
            StatementKind::Simple(simple) => Ok(StatementKind::Simple(self.simple(simple)?)),
            StatementKind::Var(var) => Ok(StatementKind::Var(self.var_decl(var)?)),
            StatementKind::Return(ret) => {
                let Return { kw_ws, values } = ret;
                Ok(StatementKind::Return(Return {
                    kw_ws,
                    values: self.elements(values, Position::Read)?,
                }))
            }
            StatementKind::If(stmt) => Ok(StatementKind::If(self.if_stmt(stmt)?)),
            StatementKind::For(stmt) => Ok(StatementKind::For(self.for_stmt(stmt)?)),
            StatementKind::Block(block) => Ok(StatementKind::Block(self.block(block)?)),
            StatementKind::Defer(stmt) => {
                let Defer { kw_ws, call } = stmt;
                Ok(StatementKind::Defer(Defer {
                    kw_ws,
                    call: self.expression(call, Position::Read)?,
                }))
            }
            StatementKind::Go(stmt) => {
                let Go { kw_ws, call } = stmt;
                Ok(StatementKind::Go(Go {
                    kw_ws,
                    call: self.expression(call, Position::Read)?,
                }))
            }
            StatementKind::Break(stmt) => Ok(StatementKind::Break(stmt)),
            StatementKind::Continue(stmt) => Ok(StatementKind::Continue(stmt)),
        }
    }

    /// Simple statements appear both on their own line and inside `if`/`for`
    /// headers; the setter rewrite applies in every position, Go accepts an
    /// expression statement in all of them.
    fn simple(&mut self, stmt: SimpleStmt<'a>) -> Result<SimpleStmt<'a>, RewriteError> {
        match stmt {
            SimpleStmt::Expr(expr) => Ok(SimpleStmt::Expr(self.expression(expr, Position::Read)?)),
            SimpleStmt::Assign(assign) => self.assign(assign),
            SimpleStmt::IncDec(stmt) => {
                let IncDec { target, ws_op, op } = stmt;
                Ok(SimpleStmt::IncDec(IncDec {
                    target: self.expression(target, Position::AssignTarget)?,
                    ws_op,
                    op,
                }))
            }
        }
    }

    fn if_stmt(&mut self, stmt: If<'a>) -> Result<If<'a>, RewriteError> {
        let If { kw_ws, init, cond, block, else_ } = stmt;
        let init = match init {
            Some((stmt, semi)) => Some((self.simple(stmt)?, semi)),
            None => None,
        };
        let cond = self.expression(cond, Position::Read)?;
        let block = self.block(block)?;
        let else_ = match else_ {
            Some(Else { ws, body }) => {
                let body = match body {
                    ElseBody::Block(block) => ElseBody::Block(self.block(block)?),
                    ElseBody::If(chained) => ElseBody::If(Box::new(self.if_stmt(*chained)?)),
                };
                Some(Else { ws, body })
            }
            None => None,
        };
        Ok(If { kw_ws, init, cond, block, else_ })
    }

    fn for_stmt(&mut self, stmt: For<'a>) -> Result<For<'a>, RewriteError> {
        let For { kw_ws, clause, block } = stmt;
        let clause = match clause {
            ForClause::Infinite => ForClause::Infinite,
            ForClause::Cond(cond) => ForClause::Cond(self.expression(cond, Position::Read)?),
            ForClause::ThreeClause { init, semi1, cond, semi2, post } => ForClause::ThreeClause {
                init: init.map(|stmt| self.simple(stmt)).transpose()?,
                semi1,
                cond: cond.map(|cond| self.expression(cond, Position::Read)).transpose()?,
                semi2,
                post: post.map(|stmt| self.simple(stmt)).transpose()?,
            },
            ForClause::Range { assign, ws_range, value } => ForClause::Range {
                assign: assign.map(|assign| self.range_assign(assign)).transpose()?,
                ws_range,
                value: self.expression(value, Position::Read)?,
            },
        };
        let block = self.block(block)?;
        Ok(For { kw_ws, clause, block })
    }

    /// `for x.Field = range xs` writes the target, but a range clause has no
    /// setter shape; the target keeps its form and verification flags it.
    fn range_assign(&mut self, assign: RangeAssign<'a>) -> Result<RangeAssign<'a>, RewriteError> {
        let RangeAssign { targets, ws_op, op } = assign;
        Ok(RangeAssign {
            targets: self.elements(targets, Position::AssignTarget)?,
            ws_op,
            op,
        })
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    fn assign(&mut self, assign: Assign<'a>) -> Result<SimpleStmt<'a>, RewriteError> {
        match self.setter_form(assign) {
            Ok((selector, ws_op, value, setter)) => self.build_setter(selector, ws_op, value, setter),
            Err(assign) => {
                let Assign { targets, ws_op, op, values } = assign;
                let targets = self.elements(targets, Position::AssignTarget)?;
                let values = self.elements(values, Position::Read)?;
                Ok(SimpleStmt::Assign(Assign { targets, ws_op, op, values }))
            }
        }
    }

    /// Splits a setter-shaped assignment into its parts, or gives the
    /// assignment back untouched.
    ///
    /// The setter shape is strict: plain `=`, exactly one target, exactly
    /// one value, and the target is a selector of a registered field with
    /// no parentheses around it. A parenthesized target is still a write,
    /// just not one this rewrite claims.
    fn setter_form(
        &self,
        assign: Assign<'a>,
    ) -> Result<(Selector<'a>, Whitespace<'a>, Expression<'a>, &'a str), Assign<'a>> {
        let registry = self.registry;
        if assign.op != AssignOp::Assign || assign.targets.len() != 1 || assign.values.len() != 1 {
            return Err(assign);
        }
        let Assign { targets, ws_op, op, values } = assign;
        let [target] = match <[Element<'a>; 1]>::try_from(targets) {
            Ok(single) => single,
            Err(targets) => return Err(Assign { targets, ws_op, op, values }),
        };
        let [value] = match <[Element<'a>; 1]>::try_from(values) {
            Ok(single) => single,
            Err(values) => {
                return Err(Assign { targets: vec![target], ws_op, op, values });
            }
        };
        let Element { value: target_value, comma: target_comma } = target;
        match target_value {
            Expression::Selector(selector) => match registry.setter(selector.field.value) {
                Some(setter) => Ok((selector, ws_op, value.value, setter)),
                None => Err(Assign {
                    targets: vec![Element {
                        value: Expression::Selector(selector),
                        comma: target_comma,
                    }],
                    ws_op,
                    op,
                    values: vec![value],
                }),
            },
            other => Err(Assign {
                targets: vec![Element { value: other, comma: target_comma }],
                ws_op,
                op,
                values: vec![value],
            }),
        }
    }

    /// `x.Field = v` becomes `x.SetField(v)`.
    ///
    /// A call has no slot for the `=` operator's trivia or for the value's
    /// leading trivia, so both go through the comment audit. A kept slice
    /// lands where it reads naturally: operator trivia before the `(`, value
    /// trivia on the argument.
    fn build_setter(
        &mut self,
        selector: Selector<'a>,
        ws_op: Whitespace<'a>,
        value: Expression<'a>,
        setter: &'a str,
    ) -> Result<SimpleStmt<'a>, RewriteError> {
        let Selector { value: base, ws_dot, field } = selector;
        let base = self.expression(*base, Position::Read)?;
        let mut value = self.expression(value, Position::Read)?;

        let ws_lparen = match self.audit.screen(ws_op.0)? {
            Disposition::Drop => Whitespace(""),
            Disposition::Keep(ws) => Whitespace(ws),
        };
        let lead = leading_ws_mut(&mut value);
        if let Disposition::Drop = self.audit.screen(lead.0)? {
            *lead = Whitespace("");
        }

        tracing::debug!(field = field.value, setter, "rewriting field write to setter call");
        self.counts.setters += 1;

        let func = Selector {
            value: Box::new(base),
            ws_dot,
            field: Name { ws: field.ws, value: setter, offset: None },
        };
        Ok(SimpleStmt::Expr(Expression::Call(Call {
            func: Box::new(Expression::Selector(func)),
            ws_lparen,
            args: vec![Arg { value, ellipsis: None, comma: None }],
            ws_rparen: Whitespace(""),
        })))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn elements(
        &mut self,
        elements: Vec<Element<'a>>,
        pos: Position,
    ) -> Result<Vec<Element<'a>>, RewriteError> {
        elements
            .into_iter()
            .map(|element| {
                let Element { value, comma } = element;
                Ok(Element { value: self.expression(value, pos)?, comma })
            })
            .collect()
    }

    fn expression(
        &mut self,
        expr: Expression<'a>,
        pos: Position,
    ) -> Result<Expression<'a>, RewriteError> {
        match expr {
            Expression::Name(name) => Ok(Expression::Name(name)),
            Expression::BasicLit(lit) => Ok(Expression::BasicLit(lit)),
            Expression::Selector(selector) => self.selector(selector, pos),
            Expression::Call(call) => self.call(call),
            Expression::Index(index) => {
                // An index target writes the element: the base and the index
                // expression are both reads either way.
                let value = self.expression(*index.value, Position::Read)?;
                let idx = self.expression(*index.index, Position::Read)?;
                Ok(Expression::Index(Index {
                    value: Box::new(value),
                    ws_lbracket: index.ws_lbracket,
                    index: Box::new(idx),
                    ws_rbracket: index.ws_rbracket,
                }))
            }
            Expression::Unary(unary) => {
                // `*x.Field = v` assigns through the pointer; the field
                // itself is read in every unary form.
                let operand = self.expression(*unary.operand, Position::Read)?;
                Ok(Expression::Unary(Unary {
                    ws: unary.ws,
                    op: unary.op,
                    operand: Box::new(operand),
                }))
            }
            Expression::Binary(binary) => {
                let left = self.expression(*binary.left, Position::Read)?;
                let right = self.expression(*binary.right, Position::Read)?;
                Ok(Expression::Binary(Binary {
                    left: Box::new(left),
                    ws_op: binary.ws_op,
                    op: binary.op,
                    right: Box::new(right),
                }))
            }
            Expression::Paren(paren) => {
                // Parens pass the position through: `(x.Field) = v` is still
                // a write of the field.
                let value = self.expression(*paren.value, pos)?;
                Ok(Expression::Paren(Paren {
                    ws: paren.ws,
                    value: Box::new(value),
                    ws_rparen: paren.ws_rparen,
                }))
            }
            Expression::CompositeLit(lit) => {
                let CompositeLit { ty, ws_lbrace, elements, ws_rbrace } = lit;
                let elements = elements
                    .into_iter()
                    .map(|element| self.keyed_element(element))
                    .collect::<Result<_, _>>()?;
                Ok(Expression::CompositeLit(CompositeLit {
                    ty,
                    ws_lbrace,
                    elements,
                    ws_rbrace,
                }))
            }
        }
    }

    fn selector(
        &mut self,
        selector: Selector<'a>,
        pos: Position,
    ) -> Result<Expression<'a>, RewriteError> {
        let registry = self.registry;
        let Selector { value, ws_dot, field } = selector;
        let base = self.expression(*value, Position::Read)?;

        if pos == Position::AssignTarget {
            return Ok(Expression::Selector(Selector {
                value: Box::new(base),
                ws_dot,
                field,
            }));
        }
        match registry.getter(field.value) {
            Some(getter) => {
                tracing::debug!(field = field.value, getter, "rewriting field read to getter call");
                self.counts.getters += 1;
                let func = Selector {
                    value: Box::new(base),
                    ws_dot,
                    field: Name { ws: field.ws, value: getter, offset: None },
                };
                Ok(Expression::Call(Call {
                    func: Box::new(Expression::Selector(func)),
                    ws_lparen: Whitespace(""),
                    args: Vec::new(),
                    ws_rparen: Whitespace(""),
                }))
            }
            None => Ok(Expression::Selector(Selector {
                value: Box::new(base),
                ws_dot,
                field,
            })),
        }
    }

    /// A selector invoked directly is a method call, not a field read; the
    /// rewrite is type-blind, so `x.Field(...)` keeps its name and only the
    /// receiver chain is rewritten.
    fn call(&mut self, call: Call<'a>) -> Result<Expression<'a>, RewriteError> {
        let Call { func, ws_lparen, args, ws_rparen } = call;
        let func = match *func {
            Expression::Selector(selector) => {
                let Selector { value, ws_dot, field } = selector;
                let base = self.expression(*value, Position::Read)?;
                Expression::Selector(Selector { value: Box::new(base), ws_dot, field })
            }
            other => self.expression(other, Position::Read)?,
        };
        let args = args
            .into_iter()
            .map(|arg| {
                let Arg { value, ellipsis, comma } = arg;
                Ok(Arg { value: self.expression(value, Position::Read)?, ellipsis, comma })
            })
            .collect::<Result<_, RewriteError>>()?;
        Ok(Expression::Call(Call { func: Box::new(func), ws_lparen, args, ws_rparen }))
    }

    /// Composite literal elements. A bare-name key is a struct field name,
    /// never an access; any other key form is a map key and gets read
    /// treatment.
    fn keyed_element(&mut self, element: KeyedElement<'a>) -> Result<KeyedElement<'a>, RewriteError> {
        let KeyedElement { key, value, comma } = element;
        let key = match key {
            Some((Expression::Name(name), ws_colon)) => Some((Expression::Name(name), ws_colon)),
            Some((other, ws_colon)) => Some((self.expression(other, Position::Read)?, ws_colon)),
            None => None,
        };
        Ok(KeyedElement {
            key,
            value: self.expression(value, Position::Read)?,
            comma,
        })
    }
}

// ============================================================================
// Trivia helpers
// ============================================================================

/// The leftmost trivia slot of an expression, where a comment directly
/// ahead of it lives.
fn leading_ws_mut<'e, 'a>(expr: &'e mut Expression<'a>) -> &'e mut Whitespace<'a> {
    match expr {
        Expression::Name(name) => &mut name.ws,
        Expression::BasicLit(lit) => &mut lit.ws,
        Expression::Selector(selector) => leading_ws_mut(&mut selector.value),
        Expression::Call(call) => leading_ws_mut(&mut call.func),
        Expression::Index(index) => leading_ws_mut(&mut index.value),
        Expression::Unary(unary) => &mut unary.ws,
        Expression::Binary(binary) => leading_ws_mut(&mut binary.left),
        Expression::Paren(paren) => &mut paren.ws,
        Expression::CompositeLit(lit) => match &mut lit.ty {
            Some(ty) => type_leading_ws_mut(ty),
            None => &mut lit.ws_lbrace,
        },
    }
}

fn type_leading_ws_mut<'e, 'a>(ty: &'e mut TypeExpr<'a>) -> &'e mut Whitespace<'a> {
    match ty {
        TypeExpr::Named(named) => match &mut named.package {
            Some((package, _)) => &mut package.ws,
            None => &mut named.name.ws,
        },
        TypeExpr::Pointer(pointer) => &mut pointer.ws,
        TypeExpr::Slice(slice) => &mut slice.ws,
        TypeExpr::Array(array) => &mut array.ws,
        TypeExpr::Map(map) => &mut map.ws,
        TypeExpr::Struct(st) => &mut st.ws,
        TypeExpr::Variadic(variadic) => &mut variadic.ws,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use encap_go_cst::{parse_module, Codegen, CodegenState};

    fn field_registry() -> AccessorRegistry {
        let mut registry = AccessorRegistry::new();
        registry.insert("Field", "GetField", "SetField").unwrap();
        registry
    }

    fn rewrite_with(
        source: &str,
        registry: &AccessorRegistry,
        policy: CommentPolicy,
    ) -> Result<(String, RewriteSummary), RewriteError> {
        let module = parse_module(source).expect("parse error");
        let (module, summary) = rewrite_module(module, registry, policy)?;
        let mut state = CodegenState::default();
        module.codegen(&mut state);
        Ok((state.to_string(), summary))
    }

    fn rewritten(source: &str) -> String {
        let registry = field_registry();
        let (output, _) = rewrite_with(source, &registry, CommentPolicy::Fail).expect("rewrite error");
        output
    }

    fn counts(source: &str) -> RewriteCounts {
        let registry = field_registry();
        let (_, summary) =
            rewrite_with(source, &registry, CommentPolicy::Fail).expect("rewrite error");
        summary.counts
    }

    fn in_main(body: &str) -> String {
        format!("package main\n\nfunc main() {{\n{body}}}\n")
    }

    mod getter_tests {
        use super::*;

        #[test]
        fn read_becomes_getter_call() {
            let source = in_main("\tprintln(x.Field)\n");
            assert_eq!(rewritten(&source), in_main("\tprintln(x.GetField())\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 0));
        }

        #[test]
        fn chained_reads_rewrite_each_link() {
            let source = in_main("\tfoo := x.Field.Field\n");
            assert_eq!(rewritten(&source), in_main("\tfoo := x.GetField().GetField()\n"));
            assert_eq!(counts(&source), RewriteCounts::new(2, 0));
        }

        #[test]
        fn mixed_chain_rewrites_only_registered_links() {
            let source = in_main("\ty := x.A.Field.B.Field\n");
            assert_eq!(rewritten(&source), in_main("\ty := x.A.GetField().B.GetField()\n"));
        }

        #[test]
        fn other_fields_untouched() {
            let source = in_main("\tprintln(x.Other)\n");
            assert_eq!(rewritten(&source), source);
            assert_eq!(counts(&source), RewriteCounts::default());
        }

        #[test]
        fn call_receiver_chain_is_rewritten() {
            let source = in_main("\tx.Field.Reset()\n");
            assert_eq!(rewritten(&source), in_main("\tx.GetField().Reset()\n"));
        }

        #[test]
        fn direct_method_call_keeps_its_name() {
            // Type-blind: `Field` here may be a method on some other type.
            let source = in_main("\tx.Field(1)\n");
            assert_eq!(rewritten(&source), source);
            assert_eq!(counts(&source), RewriteCounts::default());
        }

        #[test]
        fn call_base_selector_is_rewritten() {
            let source = in_main("\ty := f().Field\n");
            assert_eq!(rewritten(&source), in_main("\ty := f().GetField()\n"));
        }

        #[test]
        fn reads_in_condition_and_index() {
            let source = in_main("\tif x.Field > m[x.Field] {\n\t\treturn\n\t}\n");
            assert_eq!(
                rewritten(&source),
                in_main("\tif x.GetField() > m[x.GetField()] {\n\t\treturn\n\t}\n")
            );
        }

        #[test]
        fn read_inside_call_arguments() {
            let source = in_main("\tf(x.Field, g(x.Field))\n");
            assert_eq!(rewritten(&source), in_main("\tf(x.GetField(), g(x.GetField()))\n"));
            assert_eq!(counts(&source), RewriteCounts::new(2, 0));
        }

        #[test]
        fn selector_spacing_is_preserved() {
            let source = in_main("\ty := x .\tField\n");
            assert_eq!(rewritten(&source), in_main("\ty := x .\tGetField()\n"));
        }

        #[test]
        fn string_literal_content_is_not_an_access() {
            let source = in_main("\ts := \"x.Field\"\n");
            assert_eq!(rewritten(&source), source);
        }

        #[test]
        fn field_name_matches_any_receiver() {
            let source = in_main("\ta := one.Field\n\tb := other.Field\n");
            assert_eq!(
                rewritten(&source),
                in_main("\ta := one.GetField()\n\tb := other.GetField()\n")
            );
        }

        #[test]
        fn struct_literal_key_is_not_an_access() {
            let source = in_main("\tp := Point{Field: x.Field}\n");
            assert_eq!(rewritten(&source), in_main("\tp := Point{Field: x.GetField()}\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 0));
        }

        #[test]
        fn map_literal_key_is_an_access() {
            let source = in_main("\tm := map[int]int{x.Field: 1}\n");
            assert_eq!(rewritten(&source), in_main("\tm := map[int]int{x.GetField(): 1}\n"));
        }

        #[test]
        fn reads_in_return_and_var_init() {
            let source = "package main\n\nvar def = x.Field\n\nfunc f() int {\n\treturn x.Field\n}\n";
            let expected =
                "package main\n\nvar def = x.GetField()\n\nfunc f() int {\n\treturn x.GetField()\n}\n";
            assert_eq!(rewritten(source), expected);
        }

        #[test]
        fn deferred_call_receiver_is_rewritten() {
            let source = in_main("\tdefer x.Field.Close()\n\tgo x.Field.Run()\n");
            assert_eq!(
                rewritten(&source),
                in_main("\tdefer x.GetField().Close()\n\tgo x.GetField().Run()\n")
            );
        }

        #[test]
        fn range_value_is_rewritten() {
            let source = in_main("\tfor i := range x.Field {\n\t\tprintln(i)\n\t}\n");
            assert_eq!(
                rewritten(&source),
                in_main("\tfor i := range x.GetField() {\n\t\tprintln(i)\n\t}\n")
            );
        }

        #[test]
        fn address_of_field_follows_the_read_rule() {
            // Name-based rewriting cannot see addressability; `&` operands
            // get the same treatment as any other read.
            let source = in_main("\tp := &x.Field\n");
            assert_eq!(rewritten(&source), in_main("\tp := &x.GetField()\n"));
        }

        #[test]
        fn array_length_in_type_position_is_untouched() {
            // `conf.Field` here is a package-level constant; rewriting it
            // would make the array length non-constant.
            let source = "package main\n\ntype Grid struct {\n\tCells [conf.Field]int\n}\n";
            assert_eq!(rewritten(source), source);
        }
    }

    mod setter_tests {
        use super::*;

        #[test]
        fn write_becomes_setter_call() {
            let source = in_main("\tx.Field = v\n");
            assert_eq!(rewritten(&source), in_main("\tx.SetField(v)\n"));
            assert_eq!(counts(&source), RewriteCounts::new(0, 1));
        }

        #[test]
        fn write_of_composite_literal() {
            let source = in_main("\tx.Field = &MyStruct{}\n");
            assert_eq!(rewritten(&source), in_main("\tx.SetField(&MyStruct{})\n"));
        }

        #[test]
        fn write_value_is_rewritten_as_read() {
            let source = in_main("\tx.Field = x.Field\n");
            assert_eq!(rewritten(&source), in_main("\tx.SetField(x.GetField())\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 1));
        }

        #[test]
        fn write_receiver_chain_is_rewritten() {
            let source = in_main("\ta.Field.Field = v\n");
            assert_eq!(rewritten(&source), in_main("\ta.GetField().SetField(v)\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 1));
        }

        #[test]
        fn line_comments_stay_anchored() {
            let source = in_main(concat!(
                "\t// push the new value\n",
                "\tx.Field = v // inline note\n",
            ));
            let expected = in_main(concat!(
                "\t// push the new value\n",
                "\tx.SetField(v) // inline note\n",
            ));
            assert_eq!(rewritten(&source), expected);
        }

        #[test]
        fn setter_applies_in_if_init() {
            let source = in_main("\tif x.Field = v; ok {\n\t\treturn\n\t}\n");
            assert_eq!(
                rewritten(&source),
                in_main("\tif x.SetField(v); ok {\n\t\treturn\n\t}\n")
            );
        }

        #[test]
        fn compound_assignment_is_not_setter_shaped() {
            let source = in_main("\tx.Field += 1\n");
            assert_eq!(rewritten(&source), source);
            assert_eq!(counts(&source), RewriteCounts::default());
        }

        #[test]
        fn define_is_not_setter_shaped() {
            let source = in_main("\tfield := 1\n\t_ = field\n");
            assert_eq!(rewritten(&source), source);
        }

        #[test]
        fn multi_target_keeps_targets_and_rewrites_values() {
            let source = in_main("\tx.Field, y = x.Field, 2\n");
            assert_eq!(rewritten(&source), in_main("\tx.Field, y = x.GetField(), 2\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 0));
        }

        #[test]
        fn parenthesized_target_is_not_setter_shaped() {
            let source = in_main("\t(x.Field) = v\n");
            assert_eq!(rewritten(&source), source);
        }

        #[test]
        fn inc_dec_target_keeps_its_shape() {
            let source = in_main("\tx.Field++\n");
            assert_eq!(rewritten(&source), source);
        }

        #[test]
        fn inc_dec_receiver_chain_is_rewritten() {
            let source = in_main("\tx.Field.Count++\n");
            assert_eq!(rewritten(&source), in_main("\tx.GetField().Count++\n"));
        }

        #[test]
        fn index_target_reads_its_base() {
            let source = in_main("\tx.Field[i] = v\n");
            assert_eq!(rewritten(&source), in_main("\tx.GetField()[i] = v\n"));
            assert_eq!(counts(&source), RewriteCounts::new(1, 0));
        }

        #[test]
        fn deref_target_reads_its_base() {
            let source = in_main("\t*x.Field = v\n");
            assert_eq!(rewritten(&source), in_main("\t*x.GetField() = v\n"));
        }

        #[test]
        fn range_target_keeps_its_shape() {
            let source = in_main("\tfor x.Field = range xs {\n\t\tbreak\n\t}\n");
            assert_eq!(rewritten(&source), source);
        }

        #[test]
        fn unregistered_write_target_base_still_rewritten() {
            let source = in_main("\tx.Field.Other = v\n");
            assert_eq!(rewritten(&source), in_main("\tx.GetField().Other = v\n"));
        }

        #[test]
        fn explicit_semicolon_statement() {
            let source = in_main("\tx.Field = a; y = b\n");
            assert_eq!(rewritten(&source), in_main("\tx.SetField(a); y = b\n"));
        }
    }

    mod comment_policy_tests {
        use super::*;

        #[test]
        fn operator_comment_fails_by_default() {
            let registry = field_registry();
            let source = in_main("\tx.Field /* pin */ = v\n");
            let err = rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap_err();
            let RewriteError::CommentLoss(loss) = err;
            assert_eq!(loss.text, "/* pin */");
        }

        #[test]
        fn value_comment_fails_by_default() {
            let registry = field_registry();
            let source = in_main("\tx.Field = /* new */ v\n");
            let err = rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap_err();
            let RewriteError::CommentLoss(loss) = err;
            assert_eq!(loss.text, "/* new */");
        }

        #[test]
        fn operator_comment_reanchors_before_the_paren() {
            let registry = field_registry();
            let source = in_main("\tx.Field /* pin */ = v\n");
            let (output, summary) =
                rewrite_with(&source, &registry, CommentPolicy::Reanchor).unwrap();
            assert_eq!(output, in_main("\tx.SetField /* pin */ (v)\n"));
            assert_eq!(summary.warnings.len(), 1);
            assert_eq!(summary.warnings[0].code, "ReanchoredComment");
        }

        #[test]
        fn value_comment_reanchors_onto_the_argument() {
            let registry = field_registry();
            let source = in_main("\tx.Field = /* new */ v\n");
            let (output, summary) =
                rewrite_with(&source, &registry, CommentPolicy::Reanchor).unwrap();
            assert_eq!(output, in_main("\tx.SetField( /* new */ v)\n"));
            assert_eq!(summary.warnings.len(), 1);
        }

        #[test]
        fn plain_setter_produces_no_warnings() {
            let registry = field_registry();
            let source = in_main("\tx.Field = v\n");
            let (_, summary) = rewrite_with(&source, &registry, CommentPolicy::Reanchor).unwrap();
            assert!(summary.warnings.is_empty());
        }

        #[test]
        fn comments_outside_rewrites_never_trip_the_audit() {
            let registry = field_registry();
            let source = in_main(concat!(
                "\t// a comment line\n",
                "\ty := a /* gap */ + b\n",
                "\tx.Field = v\n",
            ));
            let (output, _) = rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap();
            assert_eq!(
                output,
                in_main(concat!(
                    "\t// a comment line\n",
                    "\ty := a /* gap */ + b\n",
                    "\tx.SetField(v)\n",
                ))
            );
        }
    }

    mod registry_interaction_tests {
        use super::*;

        #[test]
        fn two_registered_fields_rewrite_independently() {
            let mut registry = AccessorRegistry::new();
            registry.insert("Width", "GetWidth", "SetWidth").unwrap();
            registry.insert("Height", "GetHeight", "SetHeight").unwrap();
            let source = in_main("\tarea := r.Width * r.Height\n\tr.Width = w\n");
            let (output, summary) =
                rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap();
            assert_eq!(output, in_main("\tarea := r.GetWidth() * r.GetHeight()\n\tr.SetWidth(w)\n"));
            assert_eq!(summary.counts, RewriteCounts::new(2, 1));
        }

        #[test]
        fn empty_registry_changes_nothing() {
            let registry = AccessorRegistry::new();
            let source = in_main("\tx.Field = v\n\tprintln(x.Field)\n");
            let (output, summary) =
                rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap();
            assert_eq!(output, source);
            assert_eq!(summary.counts.total(), 0);
        }

        #[test]
        fn getter_output_is_stable_on_rerun() {
            let registry = field_registry();
            let source = in_main("\tprintln(x.Field)\n\tx.Field = v\n");
            let (first, _) = rewrite_with(&source, &registry, CommentPolicy::Fail).unwrap();
            let (second, summary) =
                rewrite_with(&first, &registry, CommentPolicy::Fail).unwrap();
            assert_eq!(second, first);
            assert_eq!(summary.counts.total(), 0);
        }
    }
}
