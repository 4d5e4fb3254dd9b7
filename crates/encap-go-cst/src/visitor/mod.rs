//! Visitor infrastructure for CST traversal.
//!
//! This module provides a read-only traversal layer over the Go CST: a
//! [`Visitor`] trait whose method pairs are macro-generated, plus manual
//! walk functions that drive a visitor over each node's children.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order (left-to-right, top-to-bottom)
//!
//! # Example
//!
//! ```
//! use encap_go_cst::visitor::{walk_module, VisitResult, Visitor};
//! use encap_go_cst::{parse_module, Selector};
//!
//! struct SelectorCounter {
//!     count: usize,
//! }
//!
//! impl<'a> Visitor<'a> for SelectorCounter {
//!     fn visit_selector(&mut self, _node: &Selector<'a>) -> VisitResult {
//!         self.count += 1;
//!         VisitResult::Continue
//!     }
//! }
//!
//! let module = parse_module("package main\n\nvar n = user.Name\n").unwrap();
//! let mut counter = SelectorCounter { count: 0 };
//! walk_module(&mut counter, &module);
//! assert_eq!(counter.count, 1);
//! ```

mod access;
mod dispatch;
mod traits;

pub use access::{FieldAccess, FieldAccessCollector, FieldAccessKind};
pub use dispatch::*;
pub use traits::{VisitResult, Visitor};
