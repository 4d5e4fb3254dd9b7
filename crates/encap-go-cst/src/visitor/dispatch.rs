//! Walk functions dispatching a [`Visitor`] over the CST.
//!
//! Every walk function follows the same frame: call the node's `visit_*`,
//! descend into children in source order unless told otherwise, then call
//! `leave_*`. The return value is [`VisitResult::Stop`] only when traversal
//! must halt; `SkipChildren` is consumed here and never propagates.

use crate::nodes::{
    Arg, Assign, BasicLit, Binary, Block, Break, Call, CompositeLit, Continue, Decl, Defer,
    Element, Else, ElseBody, Expression, FieldLine, For, ForClause, FuncDecl, Go, If, ImportBody,
    ImportDecl, ImportSpec, IncDec, Index, KeyedElement, Module, Name, PackageClause, ParamList,
    Paren, Results, Return, Selector, SimpleStmt, Statement, StatementKind, StructType, TopLevel,
    TypeDecl, TypeExpr, Unary, VarBody, VarDecl, VarSpec,
};
use crate::visitor::traits::{VisitResult, Visitor};

/// Expands the shared prologue of a walk function: run the node's `visit_*`
/// hook, return early for `SkipChildren` (after `leave_*`) and `Stop`.
macro_rules! enter {
    ($visitor:ident, $name:ident, $node:ident) => {
        paste::paste! {
            match $visitor.[<visit_ $name>]($node) {
                VisitResult::Continue => {}
                VisitResult::SkipChildren => {
                    $visitor.[<leave_ $name>]($node);
                    return VisitResult::Continue;
                }
                VisitResult::Stop => return VisitResult::Stop,
            }
        }
    };
}

/// Propagates `Stop` out of a child walk.
macro_rules! descend {
    ($walk:expr) => {
        if $walk == VisitResult::Stop {
            return VisitResult::Stop;
        }
    };
}

// ============================================================================
// Module Level
// ============================================================================

pub fn walk_module<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Module<'a>) -> VisitResult {
    enter!(visitor, module, node);
    descend!(walk_package_clause(visitor, &node.package));
    for decl in &node.decls {
        descend!(walk_top_level(visitor, decl));
    }
    visitor.leave_module(node);
    VisitResult::Continue
}

pub fn walk_package_clause<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &PackageClause<'a>,
) -> VisitResult {
    enter!(visitor, package_clause, node);
    descend!(walk_name(visitor, &node.name));
    visitor.leave_package_clause(node);
    VisitResult::Continue
}

pub fn walk_top_level<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &TopLevel<'a>,
) -> VisitResult {
    enter!(visitor, top_level, node);
    match &node.decl {
        Decl::Import(decl) => descend!(walk_import_decl(visitor, decl)),
        Decl::Func(decl) => descend!(walk_func_decl(visitor, decl)),
        Decl::Type(decl) => descend!(walk_type_decl(visitor, decl)),
        Decl::Var(decl) => descend!(walk_var_decl(visitor, decl)),
    }
    visitor.leave_top_level(node);
    VisitResult::Continue
}

// ============================================================================
// Declarations
// ============================================================================

pub fn walk_import_decl<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &ImportDecl<'a>,
) -> VisitResult {
    enter!(visitor, import_decl, node);
    match &node.body {
        ImportBody::Single(spec) => descend!(walk_import_spec(visitor, spec)),
        ImportBody::Group { specs, .. } => {
            for line in specs {
                descend!(walk_import_spec(visitor, &line.spec));
            }
        }
    }
    visitor.leave_import_decl(node);
    VisitResult::Continue
}

fn walk_import_spec<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &ImportSpec<'a>,
) -> VisitResult {
    if let Some(alias) = &node.alias {
        descend!(walk_name(visitor, alias));
    }
    descend!(walk_basic_lit(visitor, &node.path));
    VisitResult::Continue
}

pub fn walk_func_decl<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &FuncDecl<'a>,
) -> VisitResult {
    enter!(visitor, func_decl, node);
    if let Some(receiver) = &node.receiver {
        descend!(walk_param_list(visitor, receiver));
    }
    descend!(walk_name(visitor, &node.name));
    descend!(walk_param_list(visitor, &node.params));
    if let Some(results) = &node.results {
        descend!(walk_results(visitor, results));
    }
    descend!(walk_block(visitor, &node.body));
    visitor.leave_func_decl(node);
    VisitResult::Continue
}

fn walk_param_list<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &ParamList<'a>,
) -> VisitResult {
    for param in &node.params {
        if let Some(name) = &param.name {
            descend!(walk_name(visitor, name));
        }
        descend!(walk_type_expr(visitor, &param.ty));
    }
    VisitResult::Continue
}

fn walk_results<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Results<'a>) -> VisitResult {
    match node {
        Results::Single(ty) => descend!(walk_type_expr(visitor, ty)),
        Results::Tuple(list) => descend!(walk_param_list(visitor, list)),
    }
    VisitResult::Continue
}

pub fn walk_type_decl<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &TypeDecl<'a>,
) -> VisitResult {
    enter!(visitor, type_decl, node);
    descend!(walk_name(visitor, &node.name));
    descend!(walk_type_expr(visitor, &node.ty));
    visitor.leave_type_decl(node);
    VisitResult::Continue
}

pub fn walk_var_decl<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &VarDecl<'a>,
) -> VisitResult {
    enter!(visitor, var_decl, node);
    match &node.body {
        VarBody::Single(spec) => descend!(walk_var_spec(visitor, spec)),
        VarBody::Group { specs, .. } => {
            for line in specs {
                descend!(walk_var_spec(visitor, &line.spec));
            }
        }
    }
    visitor.leave_var_decl(node);
    VisitResult::Continue
}

pub fn walk_var_spec<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &VarSpec<'a>,
) -> VisitResult {
    enter!(visitor, var_spec, node);
    for field_name in &node.names {
        descend!(walk_name(visitor, &field_name.name));
    }
    if let Some(ty) = &node.ty {
        descend!(walk_type_expr(visitor, ty));
    }
    if let Some(init) = &node.init {
        for value in &init.values {
            descend!(walk_element(visitor, value));
        }
    }
    visitor.leave_var_spec(node);
    VisitResult::Continue
}

// ============================================================================
// Statements
// ============================================================================

pub fn walk_statement<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Statement<'a>,
) -> VisitResult {
    enter!(visitor, statement, node);
    match &node.kind {
        StatementKind::Simple(stmt) => descend!(walk_simple_stmt(visitor, stmt)),
        StatementKind::Var(decl) => descend!(walk_var_decl(visitor, decl)),
        StatementKind::Return(stmt) => descend!(walk_return_stmt(visitor, stmt)),
        StatementKind::If(stmt) => descend!(walk_if_stmt(visitor, stmt)),
        StatementKind::For(stmt) => descend!(walk_for_stmt(visitor, stmt)),
        StatementKind::Block(block) => descend!(walk_block(visitor, block)),
        StatementKind::Defer(stmt) => descend!(walk_defer_stmt(visitor, stmt)),
        StatementKind::Go(stmt) => descend!(walk_go_stmt(visitor, stmt)),
        StatementKind::Break(stmt) => descend!(walk_break_stmt(visitor, stmt)),
        StatementKind::Continue(stmt) => descend!(walk_continue_stmt(visitor, stmt)),
    }
    visitor.leave_statement(node);
    VisitResult::Continue
}

fn walk_simple_stmt<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &SimpleStmt<'a>,
) -> VisitResult {
    match node {
        SimpleStmt::Expr(expr) => walk_expression(visitor, expr),
        SimpleStmt::Assign(assign) => walk_assign(visitor, assign),
        SimpleStmt::IncDec(inc_dec) => walk_inc_dec(visitor, inc_dec),
    }
}

pub fn walk_block<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Block<'a>) -> VisitResult {
    enter!(visitor, block, node);
    for stmt in &node.body {
        descend!(walk_statement(visitor, stmt));
    }
    visitor.leave_block(node);
    VisitResult::Continue
}

pub fn walk_assign<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Assign<'a>) -> VisitResult {
    enter!(visitor, assign, node);
    for target in &node.targets {
        descend!(walk_element(visitor, target));
    }
    for value in &node.values {
        descend!(walk_element(visitor, value));
    }
    visitor.leave_assign(node);
    VisitResult::Continue
}

pub fn walk_element<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Element<'a>,
) -> VisitResult {
    enter!(visitor, element, node);
    descend!(walk_expression(visitor, &node.value));
    visitor.leave_element(node);
    VisitResult::Continue
}

pub fn walk_inc_dec<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &IncDec<'a>,
) -> VisitResult {
    enter!(visitor, inc_dec, node);
    descend!(walk_expression(visitor, &node.target));
    visitor.leave_inc_dec(node);
    VisitResult::Continue
}

pub fn walk_if_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &If<'a>) -> VisitResult {
    enter!(visitor, if_stmt, node);
    if let Some((init, _semi)) = &node.init {
        descend!(walk_simple_stmt(visitor, init));
    }
    descend!(walk_expression(visitor, &node.cond));
    descend!(walk_block(visitor, &node.block));
    if let Some(else_) = &node.else_ {
        descend!(walk_else(visitor, else_));
    }
    visitor.leave_if_stmt(node);
    VisitResult::Continue
}

fn walk_else<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Else<'a>) -> VisitResult {
    match &node.body {
        ElseBody::Block(block) => walk_block(visitor, block),
        ElseBody::If(if_stmt) => walk_if_stmt(visitor, if_stmt),
    }
}

pub fn walk_for_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &For<'a>) -> VisitResult {
    enter!(visitor, for_stmt, node);
    match &node.clause {
        ForClause::Infinite => {}
        ForClause::Cond(cond) => descend!(walk_expression(visitor, cond)),
        ForClause::ThreeClause {
            init, cond, post, ..
        } => {
            if let Some(init) = init {
                descend!(walk_simple_stmt(visitor, init));
            }
            if let Some(cond) = cond {
                descend!(walk_expression(visitor, cond));
            }
            if let Some(post) = post {
                descend!(walk_simple_stmt(visitor, post));
            }
        }
        ForClause::Range { assign, value, .. } => {
            if let Some(assign) = assign {
                for target in &assign.targets {
                    descend!(walk_element(visitor, target));
                }
            }
            descend!(walk_expression(visitor, value));
        }
    }
    descend!(walk_block(visitor, &node.block));
    visitor.leave_for_stmt(node);
    VisitResult::Continue
}

pub fn walk_return_stmt<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Return<'a>,
) -> VisitResult {
    enter!(visitor, return_stmt, node);
    for value in &node.values {
        descend!(walk_element(visitor, value));
    }
    visitor.leave_return_stmt(node);
    VisitResult::Continue
}

pub fn walk_defer_stmt<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Defer<'a>,
) -> VisitResult {
    enter!(visitor, defer_stmt, node);
    descend!(walk_expression(visitor, &node.call));
    visitor.leave_defer_stmt(node);
    VisitResult::Continue
}

pub fn walk_go_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Go<'a>) -> VisitResult {
    enter!(visitor, go_stmt, node);
    descend!(walk_expression(visitor, &node.call));
    visitor.leave_go_stmt(node);
    VisitResult::Continue
}

pub fn walk_break_stmt<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Break<'a>,
) -> VisitResult {
    enter!(visitor, break_stmt, node);
    visitor.leave_break_stmt(node);
    VisitResult::Continue
}

pub fn walk_continue_stmt<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Continue<'a>,
) -> VisitResult {
    enter!(visitor, continue_stmt, node);
    visitor.leave_continue_stmt(node);
    VisitResult::Continue
}

// ============================================================================
// Expressions
// ============================================================================

pub fn walk_expression<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Expression<'a>,
) -> VisitResult {
    enter!(visitor, expression, node);
    match node {
        Expression::Name(name) => descend!(walk_name(visitor, name)),
        Expression::BasicLit(lit) => descend!(walk_basic_lit(visitor, lit)),
        Expression::Selector(selector) => descend!(walk_selector(visitor, selector)),
        Expression::Call(call) => descend!(walk_call(visitor, call)),
        Expression::Index(index) => descend!(walk_index(visitor, index)),
        Expression::Unary(unary) => descend!(walk_unary(visitor, unary)),
        Expression::Binary(binary) => descend!(walk_binary(visitor, binary)),
        Expression::Paren(paren) => descend!(walk_paren(visitor, paren)),
        Expression::CompositeLit(lit) => descend!(walk_composite_lit(visitor, lit)),
    }
    visitor.leave_expression(node);
    VisitResult::Continue
}

pub fn walk_name<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Name<'a>) -> VisitResult {
    enter!(visitor, name, node);
    visitor.leave_name(node);
    VisitResult::Continue
}

pub fn walk_basic_lit<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &BasicLit<'a>,
) -> VisitResult {
    enter!(visitor, basic_lit, node);
    visitor.leave_basic_lit(node);
    VisitResult::Continue
}

pub fn walk_selector<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &Selector<'a>,
) -> VisitResult {
    enter!(visitor, selector, node);
    descend!(walk_expression(visitor, &node.value));
    descend!(walk_name(visitor, &node.field));
    visitor.leave_selector(node);
    VisitResult::Continue
}

pub fn walk_call<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Call<'a>) -> VisitResult {
    enter!(visitor, call, node);
    descend!(walk_expression(visitor, &node.func));
    for arg in &node.args {
        descend!(walk_arg(visitor, arg));
    }
    visitor.leave_call(node);
    VisitResult::Continue
}

pub fn walk_arg<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Arg<'a>) -> VisitResult {
    enter!(visitor, arg, node);
    descend!(walk_expression(visitor, &node.value));
    visitor.leave_arg(node);
    VisitResult::Continue
}

pub fn walk_index<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Index<'a>) -> VisitResult {
    enter!(visitor, index, node);
    descend!(walk_expression(visitor, &node.value));
    descend!(walk_expression(visitor, &node.index));
    visitor.leave_index(node);
    VisitResult::Continue
}

pub fn walk_unary<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Unary<'a>) -> VisitResult {
    enter!(visitor, unary, node);
    descend!(walk_expression(visitor, &node.operand));
    visitor.leave_unary(node);
    VisitResult::Continue
}

pub fn walk_binary<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Binary<'a>) -> VisitResult {
    enter!(visitor, binary, node);
    descend!(walk_expression(visitor, &node.left));
    descend!(walk_expression(visitor, &node.right));
    visitor.leave_binary(node);
    VisitResult::Continue
}

pub fn walk_paren<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: &Paren<'a>) -> VisitResult {
    enter!(visitor, paren, node);
    descend!(walk_expression(visitor, &node.value));
    visitor.leave_paren(node);
    VisitResult::Continue
}

pub fn walk_composite_lit<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &CompositeLit<'a>,
) -> VisitResult {
    enter!(visitor, composite_lit, node);
    if let Some(ty) = &node.ty {
        descend!(walk_type_expr(visitor, ty));
    }
    for element in &node.elements {
        descend!(walk_keyed_element(visitor, element));
    }
    visitor.leave_composite_lit(node);
    VisitResult::Continue
}

pub fn walk_keyed_element<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &KeyedElement<'a>,
) -> VisitResult {
    enter!(visitor, keyed_element, node);
    if let Some((key, _ws)) = &node.key {
        descend!(walk_expression(visitor, key));
    }
    descend!(walk_expression(visitor, &node.value));
    visitor.leave_keyed_element(node);
    VisitResult::Continue
}

// ============================================================================
// Types
// ============================================================================

pub fn walk_type_expr<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &TypeExpr<'a>,
) -> VisitResult {
    enter!(visitor, type_expr, node);
    match node {
        TypeExpr::Named(named) => {
            if let Some((package, _ws)) = &named.package {
                descend!(walk_name(visitor, package));
            }
            descend!(walk_name(visitor, &named.name));
        }
        TypeExpr::Pointer(pointer) => descend!(walk_type_expr(visitor, &pointer.elem)),
        TypeExpr::Slice(slice) => descend!(walk_type_expr(visitor, &slice.elem)),
        TypeExpr::Array(array) => {
            descend!(walk_expression(visitor, &array.len));
            descend!(walk_type_expr(visitor, &array.elem));
        }
        TypeExpr::Map(map) => {
            descend!(walk_type_expr(visitor, &map.key));
            descend!(walk_type_expr(visitor, &map.value));
        }
        TypeExpr::Struct(struct_type) => descend!(walk_struct_type(visitor, struct_type)),
        TypeExpr::Variadic(variadic) => descend!(walk_type_expr(visitor, &variadic.elem)),
    }
    visitor.leave_type_expr(node);
    VisitResult::Continue
}

pub fn walk_struct_type<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &StructType<'a>,
) -> VisitResult {
    enter!(visitor, struct_type, node);
    for field in &node.fields {
        descend!(walk_field_line(visitor, field));
    }
    visitor.leave_struct_type(node);
    VisitResult::Continue
}

pub fn walk_field_line<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    node: &FieldLine<'a>,
) -> VisitResult {
    enter!(visitor, field_line, node);
    for field_name in &node.names {
        descend!(walk_name(visitor, &field_name.name));
    }
    descend!(walk_type_expr(visitor, &node.ty));
    if let Some(tag) = &node.tag {
        descend!(walk_basic_lit(visitor, tag));
    }
    visitor.leave_field_line(node);
    VisitResult::Continue
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    #[derive(Default)]
    struct NameLog {
        entered: Vec<String>,
        left: Vec<String>,
    }

    impl<'a> Visitor<'a> for NameLog {
        fn visit_name(&mut self, node: &Name<'a>) -> VisitResult {
            self.entered.push(node.value.to_string());
            VisitResult::Continue
        }

        fn leave_name(&mut self, node: &Name<'a>) {
            self.left.push(node.value.to_string());
        }
    }

    #[test]
    fn names_visited_in_source_order() {
        let source = "package main\n\nfunc main() {\n\tprintln(x.Field)\n}\n";
        let module = parse_module(source).unwrap();
        let mut log = NameLog::default();
        walk_module(&mut log, &module);
        assert_eq!(log.entered, ["main", "main", "println", "x", "Field"]);
        assert_eq!(log.entered, log.left);
    }

    #[test]
    fn walk_reaches_into_types_and_literals() {
        let source = "package main\n\ntype Grid struct {\n\tCells [w]int\n}\n\nvar g = Grid{Cells: start}\n";
        let module = parse_module(source).unwrap();
        let mut log = NameLog::default();
        walk_module(&mut log, &module);
        // Array length expression and composite literal key both reached.
        assert!(log.entered.contains(&"w".to_string()));
        assert!(log.entered.contains(&"start".to_string()));
    }

    #[test]
    fn skip_children_prunes_a_subtree() {
        struct SkipCalls {
            names: Vec<String>,
        }
        impl<'a> Visitor<'a> for SkipCalls {
            fn visit_call(&mut self, _node: &Call<'a>) -> VisitResult {
                VisitResult::SkipChildren
            }
            fn visit_name(&mut self, node: &Name<'a>) -> VisitResult {
                self.names.push(node.value.to_string());
                VisitResult::Continue
            }
        }

        let source = "package main\n\nfunc main() {\n\tprintln(inner)\n\touter = 1\n}\n";
        let module = parse_module(source).unwrap();
        let mut v = SkipCalls { names: Vec::new() };
        walk_module(&mut v, &module);
        assert!(!v.names.contains(&"inner".to_string()));
        assert!(v.names.contains(&"outer".to_string()));
    }

    #[test]
    fn stop_halts_the_walk() {
        struct StopAtFirstName {
            seen: usize,
        }
        impl<'a> Visitor<'a> for StopAtFirstName {
            fn visit_name(&mut self, _node: &Name<'a>) -> VisitResult {
                self.seen += 1;
                VisitResult::Stop
            }
        }

        let source = "package main\n\nvar a, b, c int\n";
        let module = parse_module(source).unwrap();
        let mut v = StopAtFirstName { seen: 0 };
        assert_eq!(walk_module(&mut v, &module), VisitResult::Stop);
        assert_eq!(v.seen, 1);
    }
}
