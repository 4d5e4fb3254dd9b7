//! A Go parser and Concrete Syntax Tree (CST) library.
//!
//! This crate parses the Go subset used by struct-accessor refactors into a
//! CST that preserves all whitespace and comments, so regenerating an
//! unmodified tree reproduces the input byte for byte.
//!
//! # Overview
//!
//! - **Parsing**: Parse Go source into a CST with [`parse_module`].
//! - **Code Generation**: Convert the CST back to source with the [`Codegen`]
//!   trait.
//! - **Traversal**: Walk the tree read-only with the [`visitor`] module.
//!
//! # Quick Start
//!
//! ```
//! use encap_go_cst::{parse_module, Codegen, CodegenState};
//!
//! let source = "package main\n\nfunc main() {\n\tprintln(user.Name)\n}\n";
//! let module = parse_module(source).expect("parse error");
//!
//! // Round-trip: convert back to source
//! let mut state = CodegenState::default();
//! module.codegen(&mut state);
//! assert_eq!(state.to_string(), source);
//! ```
//!
//! # Grammar Subset
//!
//! The grammar covers what field-access refactoring targets actually
//! contain: package/import/type/func/var declarations, the common statement
//! forms, and the full expression grammar with Go operator precedence.
//! Constructs outside the subset (`switch`, channels, function literals,
//! generics, ...) are reported as [`ParserError::UnsupportedConstruct`]
//! rather than silently mangled.

use encap_core::text::{byte_offset_to_position, line_start_offset};

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Tokenizer for Go source code.
pub mod tokenizer;

mod nodes;
pub use nodes::*;

mod parser;
pub use parser::{ParserError, Result};

/// Visitor infrastructure for CST traversal.
pub mod visitor;
pub use visitor::{FieldAccess, FieldAccessCollector, FieldAccessKind, VisitResult, Visitor};
// Re-export walk functions for CST traversal
pub use visitor::{
    walk_arg, walk_assign, walk_basic_lit, walk_binary, walk_block, walk_break_stmt, walk_call,
    walk_composite_lit, walk_continue_stmt, walk_defer_stmt, walk_element, walk_expression,
    walk_field_line, walk_for_stmt, walk_func_decl, walk_go_stmt, walk_if_stmt, walk_import_decl,
    walk_inc_dec, walk_index, walk_keyed_element, walk_module, walk_name, walk_package_clause,
    walk_paren, walk_return_stmt, walk_selector, walk_statement, walk_struct_type, walk_top_level,
    walk_type_decl, walk_type_expr, walk_unary, walk_var_decl, walk_var_spec,
};

// ============================================================================
// Parsing functions
// ============================================================================

/// Parses a Go source file into a concrete syntax tree.
///
/// The returned [`Module`] borrows from `source`; every byte of the input is
/// owned by exactly one node field, so `module.codegen(..)` of an untouched
/// tree regenerates `source` exactly.
///
/// # Errors
///
/// Returns a [`ParserError`] for tokenizer failures, syntax errors, and
/// constructs outside the supported subset. Use [`prettify_error`] to render
/// the error with source context.
pub fn parse_module(source: &str) -> Result<'_, Module<'_>> {
    parser::parse(source)
}

// ============================================================================
// Error Formatting
// ============================================================================

/// Formats a parser error into a human-readable string with source context.
///
/// Renders the offending line (plus one line of context either side) with
/// the error location highlighted.
///
/// # Arguments
///
/// * `err` - The parser error to format
/// * `label` - A label for the source, typically the file name
///
/// # Example
///
/// ```
/// use encap_go_cst::{parse_module, prettify_error};
///
/// let result = parse_module("package");
/// if let Err(e) = result {
///     let formatted = prettify_error(e, "example.go");
///     println!("{}", formatted);
/// }
/// ```
pub fn prettify_error(err: ParserError<'_>, label: &str) -> String {
    render_error(err, label, annotate_snippets::Renderer::styled())
}

/// Like [`prettify_error`], but without terminal styling.
///
/// Suitable for log lines and machine-readable error payloads where ANSI
/// escape sequences would leak through.
pub fn plain_error(err: ParserError<'_>, label: &str) -> String {
    render_error(err, label, annotate_snippets::Renderer::plain())
}

fn render_error(err: ParserError<'_>, label: &str, renderer: annotate_snippets::Renderer) -> String {
    use annotate_snippets::{Level, Snippet};

    let text = err.source_text();
    let offset = err.offset().min(text.len());
    let message = err.to_string();

    let (line, _col) = byte_offset_to_position(text, offset);
    let context = 1u32;
    let first_line = line.saturating_sub(context).max(1);
    let start_offset = line_start_offset(text, first_line).unwrap_or(0);
    let end_offset = line_start_offset(text, line + context + 1).unwrap_or(text.len());
    let snippet = &text[start_offset..end_offset];

    let start = offset - start_offset;
    let end = (start + 1).min(snippet.len() + 1);

    let rendered = renderer
        .render(
            Level::Error.title(label).snippet(
                Snippet::source(snippet)
                    .line_start(first_line as usize)
                    .fold(false)
                    .annotations(vec![Level::Error.span(start..end).label(&message)]),
            ),
        )
        .to_string();
    rendered
}

// ============================================================================
// Tests
// ============================================================================
