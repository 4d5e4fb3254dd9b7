//! Round-trip tests for the encap-go-cst parser.
//!
//! These tests verify that `parse(code).codegen() == code` for all supported
//! Go source. This is a fundamental invariant for rewrite operations.
//!
//! # Test Organization
//!
//! - Fixture-based tests: One test per fixture file in `tests/fixtures/`
//! - Inline tests: Individual test cases for specific Go constructs
//!
//! # Adding New Tests
//!
//! To add a new fixture-based test, create a `.go` file in `tests/fixtures/`
//! and add a corresponding `roundtrip_fixture_<name>` test function.

use difference::assert_diff;
use encap_go_cst::{parse_module, prettify_error, Codegen};
use itertools::Itertools;
use std::path::PathBuf;

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

/// Helper to perform round-trip test on source code
fn assert_roundtrip(input: &str, label: &str) {
    // Handle UTF-8 BOM if present
    let input = if let Some(stripped) = input.strip_prefix('\u{feff}') {
        stripped
    } else {
        input
    };

    let module = match parse_module(input) {
        Ok(m) => m,
        Err(e) => panic!("{}", prettify_error(e, label)),
    };

    let mut state = Default::default();
    module.codegen(&mut state);
    let generated = state.to_string();

    if generated != input {
        let got = visualize(&generated);
        let expected = visualize(input);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

/// Helper to load and test a fixture file
fn assert_roundtrip_fixture(fixture_name: &str) {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(fixture_name);

    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture_name, e));

    assert_roundtrip(&contents, fixture_name);
}

// =============================================================================
// Fixture-based round-trip tests
// =============================================================================
//
// Each test loads a fixture file from tests/fixtures/ and verifies round-trip.

#[test]
fn roundtrip_fixture_accessors() {
    assert_roundtrip_fixture("accessors.go");
}

#[test]
fn roundtrip_fixture_comments() {
    assert_roundtrip_fixture("comments.go");
}

#[test]
fn roundtrip_fixture_control_flow() {
    assert_roundtrip_fixture("control_flow.go");
}

#[test]
fn roundtrip_fixture_declarations() {
    assert_roundtrip_fixture("declarations.go");
}

#[test]
fn roundtrip_fixture_expressions() {
    assert_roundtrip_fixture("expressions.go");
}

#[test]
fn roundtrip_fixture_simple() {
    assert_roundtrip_fixture("simple.go");
}

#[test]
fn roundtrip_fixture_spacing() {
    assert_roundtrip_fixture("spacing.go");
}

#[test]
fn roundtrip_fixture_structs() {
    assert_roundtrip_fixture("structs.go");
}

// =============================================================================
// Inline round-trip tests for specific constructs
// =============================================================================
//
// These tests verify specific Go constructs directly without fixture files.

// --- Functions and methods ---

#[test]
fn roundtrip_simple_function() {
    assert_roundtrip(
        r#"package main

func greet(name string) string {
	return "Hello, " + name
}
"#,
        "simple_function",
    );
}

#[test]
fn roundtrip_method_with_pointer_receiver() {
    assert_roundtrip(
        r#"package main

func (s *Store) Len() int {
	return s.count
}
"#,
        "method_with_pointer_receiver",
    );
}

#[test]
fn roundtrip_multiple_return_values() {
    assert_roundtrip(
        r#"package main

func divmod(a, b int) (int, int) {
	return a / b, a % b
}
"#,
        "multiple_return_values",
    );
}

#[test]
fn roundtrip_named_results() {
    assert_roundtrip(
        r#"package main

func bounds(xs []int) (lo, hi int) {
	return xs[0], xs[len(xs)-1]
}
"#,
        "named_results",
    );
}

#[test]
fn roundtrip_variadic_function() {
    assert_roundtrip(
        r#"package main

func join(sep string, parts ...string) string {
	return concat(sep, parts...)
}
"#,
        "variadic_function",
    );
}

#[test]
fn roundtrip_single_line_function() {
    assert_roundtrip(
        r#"package main

func add(a, b int) int { return a + b }
"#,
        "single_line_function",
    );
}

// --- Statements ---

#[test]
fn roundtrip_if_with_init_statement() {
    assert_roundtrip(
        r#"package main

func check(m map[string]int, key string) int {
	if v, ok := m[key]; ok {
		return v
	}
	return 0
}
"#,
        "if_with_init_statement",
    );
}

#[test]
fn roundtrip_range_forms() {
    assert_roundtrip(
        r#"package main

func drain(xs []int, ch chanLike) {
	for i := range xs {
		xs[i] = 0
	}
	for _, v := range xs {
		use(v)
	}
	for range ch {
		tick()
	}
}
"#,
        "range_forms",
    );
}

#[test]
fn roundtrip_defer_and_go() {
    assert_roundtrip(
        r#"package main

func serve(l listener) {
	defer l.Close()
	go l.Accept()
}
"#,
        "defer_and_go",
    );
}

#[test]
fn roundtrip_compound_assignments() {
    assert_roundtrip(
        r#"package main

func mix(a, b int) int {
	a += b
	a -= 1
	a *= 2
	a /= 3
	a %= 5
	a &= b
	a |= b
	a ^= b
	a <<= 1
	a >>= 1
	a &^= b
	return a
}
"#,
        "compound_assignments",
    );
}

#[test]
fn roundtrip_multi_target_assignment() {
    assert_roundtrip(
        r#"package main

func swap(a, b int) (int, int) {
	a, b = b, a
	return a, b
}
"#,
        "multi_target_assignment",
    );
}

#[test]
fn roundtrip_explicit_semicolons() {
    assert_roundtrip(
        r#"package main

func f() int { a := 1; a++; return a }
"#,
        "explicit_semicolons",
    );
}

#[test]
fn roundtrip_bare_block() {
    assert_roundtrip(
        r#"package main

func scoped() {
	{
		x := 1
		_ = x
	}
}
"#,
        "bare_block",
    );
}

// --- Expressions ---

#[test]
fn roundtrip_parenthesized_composite_in_condition() {
    assert_roundtrip(
        r#"package main

func isZero(p Point) bool {
	if p == (Point{}) {
		return true
	}
	return false
}
"#,
        "parenthesized_composite_in_condition",
    );
}

#[test]
fn roundtrip_pointer_dance() {
    assert_roundtrip(
        r#"package main

func bump(n *int) {
	*n = *n + 1
}
"#,
        "pointer_dance",
    );
}

#[test]
fn roundtrip_selector_chains() {
    assert_roundtrip(
        r#"package main

func deep(a A) int {
	return a.b.c.d.value
}
"#,
        "selector_chains",
    );
}

#[test]
fn roundtrip_call_chains() {
    assert_roundtrip(
        r#"package main

func fluent(b builder) string {
	return b.With("a").With("b").Build()
}
"#,
        "call_chains",
    );
}

// --- Comments and whitespace edge cases ---

#[test]
fn roundtrip_block_comment_between_tokens() {
    assert_roundtrip(
        r#"package main

var x = /* start */ 1
"#,
        "block_comment_between_tokens",
    );
}

#[test]
fn roundtrip_comment_without_final_newline() {
    assert_roundtrip("package main\n// no newline", "comment_without_final_newline");
}

#[test]
fn roundtrip_crlf_line_endings() {
    assert_roundtrip(
        "package main\r\n\r\nvar x = 1\r\n",
        "crlf_line_endings",
    );
}

#[test]
fn roundtrip_missing_final_newline() {
    assert_roundtrip("package main\n\nvar x = 1", "missing_final_newline");
}

#[test]
fn roundtrip_trailing_whitespace() {
    assert_roundtrip(
        "package main\n\nfunc f() {\t\n\tprintln(1)  \n}\n",
        "trailing_whitespace",
    );
}

#[test]
fn roundtrip_package_only() {
    assert_roundtrip("package main\n", "package_only");
}

#[test]
fn roundtrip_package_without_newline() {
    assert_roundtrip("package main", "package_without_newline");
}

#[test]
fn roundtrip_utf8_bom() {
    assert_roundtrip("\u{feff}package main\n\nvar x = 1\n", "utf8_bom");
}

#[test]
fn roundtrip_unicode_identifiers() {
    assert_roundtrip(
        "package main\n\nfunc 计数(初始 int) int {\n\treturn 初始 + 1\n}\n",
        "unicode_identifiers",
    );
}

// --- Declarations ---

#[test]
fn roundtrip_dot_import() {
    assert_roundtrip(
        r#"package main

import . "strings"
"#,
        "dot_import",
    );
}

#[test]
fn roundtrip_grouped_const_with_iota() {
    assert_roundtrip(
        r#"package main

const (
	north = iota
	east
	south
	west
)
"#,
        "grouped_const_with_iota",
    );
}

#[test]
fn roundtrip_type_declarations() {
    assert_roundtrip(
        r#"package main

type ID int

type Labels []string

type Weights map[string]float64
"#,
        "type_declarations",
    );
}
