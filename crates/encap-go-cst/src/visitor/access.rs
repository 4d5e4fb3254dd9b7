//! Field access collection: finds `expr.Field` accesses and classifies each
//! as a read, a write target, or a call.
//!
//! The classification mirrors Go's own reading of the tree:
//!
//! - An assignment or `++`/`--` target, or a `for ... = range` target, is a
//!   **Write** of its outermost selector.
//! - A selector called directly (`x.Field(...)`) is a **Call**.
//! - Every other selector position is a **Read**. That includes the base
//!   chain of an index target (`x.Field[i] = v` writes the element, reads
//!   `x.Field`) and the receiver of a write (`x.Field.Inner = v` reads
//!   `x.Field`).
//!
//! Ancestors claim their classification before the selector itself is
//! visited (pre-order), so the default Read only applies to unclaimed
//! selectors.

use std::collections::HashSet;
use std::fmt;

use crate::nodes::{Assign, Call, Expression, For, ForClause, IncDec, Module, Selector};
use crate::visitor::dispatch::walk_module;
use crate::visitor::traits::{VisitResult, Visitor};

/// How a field access is used at its site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccessKind {
    /// The field's value is read.
    Read,
    /// The field is the target of an assignment or increment.
    Write,
    /// The field is invoked directly: `x.Field(...)`.
    Call,
}

impl FieldAccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldAccessKind::Read => "read",
            FieldAccessKind::Write => "write",
            FieldAccessKind::Call => "call",
        }
    }
}

impl fmt::Display for FieldAccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collected access of the tracked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    /// The field name, as written at the access site.
    pub field: String,
    pub kind: FieldAccessKind,
    /// Byte offset of the field name in the source the tree was parsed
    /// from. `None` only for names synthesized by a rewrite.
    pub offset: Option<usize>,
}

/// Collects accesses of one field name across a module.
///
/// Runs over a parsed tree; the driver uses it after a rewrite to find
/// write-position accesses the rewrite could not turn into setter calls.
pub struct FieldAccessCollector {
    field: String,
    accesses: Vec<FieldAccess>,
    /// Offsets of field names an ancestor already classified.
    claimed: HashSet<usize>,
}

impl FieldAccessCollector {
    /// Collect all accesses of `field` in `module`, in source order.
    pub fn collect(module: &Module<'_>, field: &str) -> Vec<FieldAccess> {
        let mut collector = FieldAccessCollector {
            field: field.to_string(),
            accesses: Vec::new(),
            claimed: HashSet::new(),
        };
        walk_module(&mut collector, module);
        collector.accesses.sort_by_key(|access| access.offset);
        collector.accesses
    }

    fn record(&mut self, kind: FieldAccessKind, offset: Option<usize>) {
        self.accesses.push(FieldAccess {
            field: self.field.clone(),
            kind,
            offset,
        });
        if let Some(offset) = offset {
            self.claimed.insert(offset);
        }
    }

    /// Claim `target` if its outermost expression (through parens) is a
    /// selector of the tracked field.
    fn claim(&mut self, target: &Expression<'_>, kind: FieldAccessKind) {
        if let Expression::Selector(selector) = unwrap_parens(target) {
            if selector.field.value == self.field {
                self.record(kind, selector.field.offset);
            }
        }
    }
}

/// Peels parentheses: `((x.Field))` is the same target as `x.Field`.
fn unwrap_parens<'e, 'a>(mut expr: &'e Expression<'a>) -> &'e Expression<'a> {
    while let Expression::Paren(paren) = expr {
        expr = &paren.value;
    }
    expr
}

impl<'a> Visitor<'a> for FieldAccessCollector {
    fn visit_assign(&mut self, node: &Assign<'a>) -> VisitResult {
        for target in &node.targets {
            self.claim(&target.value, FieldAccessKind::Write);
        }
        VisitResult::Continue
    }

    fn visit_inc_dec(&mut self, node: &IncDec<'a>) -> VisitResult {
        self.claim(&node.target, FieldAccessKind::Write);
        VisitResult::Continue
    }

    fn visit_for_stmt(&mut self, node: &For<'a>) -> VisitResult {
        // `for x.Field = range xs` writes the target. `:=` targets are
        // plain names, so claiming selectors covers exactly the `=` form.
        if let ForClause::Range {
            assign: Some(assign),
            ..
        } = &node.clause
        {
            for target in &assign.targets {
                self.claim(&target.value, FieldAccessKind::Write);
            }
        }
        VisitResult::Continue
    }

    fn visit_call(&mut self, node: &Call<'a>) -> VisitResult {
        self.claim(&node.func, FieldAccessKind::Call);
        VisitResult::Continue
    }

    fn visit_selector(&mut self, node: &Selector<'a>) -> VisitResult {
        if node.field.value == self.field {
            let claimed = node
                .field
                .offset
                .is_some_and(|offset| self.claimed.contains(&offset));
            if !claimed {
                self.record(FieldAccessKind::Read, node.field.offset);
            }
        }
        VisitResult::Continue
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    fn kinds(source: &str, field: &str) -> Vec<FieldAccessKind> {
        let module = parse_module(source).unwrap();
        FieldAccessCollector::collect(&module, field)
            .into_iter()
            .map(|access| access.kind)
            .collect()
    }

    fn in_main(body: &str) -> String {
        format!("package main\n\nfunc main() {{\n{body}}}\n")
    }

    #[test]
    fn plain_read() {
        let source = in_main("\tprintln(x.Field)\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Read]);
    }

    #[test]
    fn assignment_target_is_write() {
        let source = in_main("\tx.Field = v\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn compound_assignment_target_is_write() {
        let source = in_main("\tx.Field += 1\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn inc_dec_target_is_write() {
        let source = in_main("\tx.Field++\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn parenthesized_target_is_write() {
        let source = in_main("\t(x.Field) = v\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn range_assignment_target_is_write() {
        let source = in_main("\tfor x.Field = range xs {\n\t}\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn direct_call_is_call() {
        let source = in_main("\tx.Field(1)\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Call]);
    }

    #[test]
    fn multi_target_assignment_claims_each_selector() {
        let source = in_main("\tx.Field, y = a, b\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Write]);
    }

    #[test]
    fn index_target_reads_its_base() {
        // The element is written, the field itself is read.
        let source = in_main("\tx.Field[i] = v\n");
        assert_eq!(kinds(&source, "Field"), [FieldAccessKind::Read]);
    }

    #[test]
    fn write_receiver_chain_still_reads_inner_access() {
        let source = in_main("\tx.Field.Field = v\n");
        // Outer selector is the write target; its receiver reads the field.
        assert_eq!(
            kinds(&source, "Field"),
            [FieldAccessKind::Read, FieldAccessKind::Write]
        );
    }

    #[test]
    fn other_fields_ignored() {
        let source = in_main("\tx.Other = v\n\tprintln(x.Other)\n");
        assert_eq!(kinds(&source, "Field"), []);
    }

    #[test]
    fn accesses_come_back_in_source_order() {
        let source = in_main("\tx.Field = x.Field\n");
        let module = parse_module(&source).unwrap();
        let accesses = FieldAccessCollector::collect(&module, "Field");
        assert_eq!(accesses.len(), 2);
        assert_eq!(accesses[0].kind, FieldAccessKind::Write);
        assert_eq!(accesses[1].kind, FieldAccessKind::Read);
        assert!(accesses[0].offset < accesses[1].offset);
    }
}
