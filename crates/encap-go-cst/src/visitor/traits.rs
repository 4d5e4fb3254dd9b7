//! Visitor trait definitions for CST traversal.

use crate::nodes::{
    // Module
    Module, PackageClause, TopLevel,
    // Declarations
    FuncDecl, ImportDecl, TypeDecl, VarDecl, VarSpec,
    // Statements
    Assign, Block, Break, Continue, Defer, Element, For, Go, If, IncDec, Return, Statement,
    // Expressions
    Arg, BasicLit, Binary, Call, CompositeLit, Expression, Index, KeyedElement, Name, Paren,
    Selector, Unary,
    // Types
    FieldLine, StructType, TypeExpr,
};

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

impl Default for VisitResult {
    fn default() -> Self {
        Self::Continue
    }
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing,
/// respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Immutable visitor for CST traversal.
///
/// Implement this trait to traverse a CST without modifying it. Each node
/// type has a corresponding `visit_*` and `leave_*` method pair.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order (left-to-right, top-to-bottom)
///
/// # Control Flow
///
/// - Return `VisitResult::Continue` to traverse into children
/// - Return `VisitResult::SkipChildren` to skip children (but `leave_*` still
///   called)
/// - Return `VisitResult::Stop` to halt traversal immediately
///
/// # Example
///
/// ```
/// use encap_go_cst::visitor::{walk_module, VisitResult, Visitor};
/// use encap_go_cst::{parse_module, Name};
///
/// struct NameCounter {
///     count: usize,
/// }
///
/// impl<'a> Visitor<'a> for NameCounter {
///     fn visit_name(&mut self, _node: &Name<'a>) -> VisitResult {
///         self.count += 1;
///         VisitResult::Continue
///     }
/// }
///
/// let module = parse_module("package main\n\nvar x = y\n").unwrap();
/// let mut counter = NameCounter { count: 0 };
/// walk_module(&mut counter, &module);
/// assert!(counter.count > 0);
/// ```
pub trait Visitor<'a> {
    // Module
    visitor_methods! {
        module: Module<'a>,
        package_clause: PackageClause<'a>,
        top_level: TopLevel<'a>,
    }

    // Declarations
    visitor_methods! {
        import_decl: ImportDecl<'a>,
        func_decl: FuncDecl<'a>,
        type_decl: TypeDecl<'a>,
        var_decl: VarDecl<'a>,
        var_spec: VarSpec<'a>,
    }

    // Statements
    visitor_methods! {
        statement: Statement<'a>,
        block: Block<'a>,
        assign: Assign<'a>,
        inc_dec: IncDec<'a>,
        if_stmt: If<'a>,
        for_stmt: For<'a>,
        return_stmt: Return<'a>,
        defer_stmt: Defer<'a>,
        go_stmt: Go<'a>,
        break_stmt: Break<'a>,
        continue_stmt: Continue<'a>,
        element: Element<'a>,
    }

    // Expressions
    visitor_methods! {
        expression: Expression<'a>,
        name: Name<'a>,
        basic_lit: BasicLit<'a>,
        selector: Selector<'a>,
        call: Call<'a>,
        arg: Arg<'a>,
        index: Index<'a>,
        unary: Unary<'a>,
        binary: Binary<'a>,
        paren: Paren<'a>,
        composite_lit: CompositeLit<'a>,
        keyed_element: KeyedElement<'a>,
    }

    // Types
    visitor_methods! {
        type_expr: TypeExpr<'a>,
        struct_type: StructType<'a>,
        field_line: FieldLine<'a>,
    }
}
