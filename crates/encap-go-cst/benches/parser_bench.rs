//! Performance benchmarks for the encap-go-cst parser and visitors.
//!
//! Run with:
//! ```bash
//! cargo bench -p encap-go-cst
//! ```
//!
//! # Benchmark Categories
//!
//! 1. **Parsing**: Measure parse_module performance on various file sizes
//! 2. **Analysis**: Measure field-access collection performance
//! 3. **Codegen**: Measure regeneration and full round-trip performance

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use encap_go_cst::{parse_module, Codegen, CodegenState, FieldAccessCollector};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Generate simple Go functions with a little control flow.
fn generate_simple_code(num_funcs: usize) -> String {
    let mut code = String::from("package bench\n\n");
    for i in 0..num_funcs {
        code.push_str(&format!(
            r#"func process{i}(a, b int, scale int) int {{
	result := a + b
	if scale > 0 {{
		result *= scale
	}}
	return result
}}

"#
        ));
    }
    code
}

/// Generate Go structs with methods.
fn generate_struct_code(num_structs: usize) -> String {
    let mut code = String::from("package bench\n\n");
    for i in 0..num_structs {
        code.push_str(&format!(
            r#"type Record{i} struct {{
	Field  int
	Label  string
	Parent *Record{i}
}}

func (r *Record{i}) Process(data int) int {{
	return r.Field + data
}}

func (r *Record{i}) Transform(items []int) []int {{
	result := []int{{}}
	for _, item := range items {{
		result = append(result, r.Process(item))
	}}
	return result
}}

"#
        ));
    }
    code
}

/// Generate Go code dense with field reads and writes.
fn generate_access_code(num_funcs: usize) -> String {
    let mut code = String::from(
        "package bench\n\ntype node struct {\n\tField int\n\tNext  *node\n}\n\n",
    );
    for i in 0..num_funcs {
        code.push_str(&format!(
            r#"func touch{i}(n *node) int {{
	n.Field = n.Field + {i}
	n.Next.Field = n.Field
	total := n.Field + n.Next.Field
	n.Field++
	return total
}}

"#
        ));
    }
    code
}

/// Load a fixture file for benchmarking.
fn load_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);

    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_simple");

    for size in [10, 50, 100, 200].iter() {
        let code = generate_simple_code(*size);
        let bytes = code.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_funcs", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let _ = black_box(parse_module(code).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_parse_structs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_structs");

    for size in [10, 50, 100].iter() {
        let code = generate_struct_code(*size);
        let bytes = code.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_structs", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let _ = black_box(parse_module(code).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_parse_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_fixtures");

    // Benchmark on real fixture files
    let fixtures = [
        ("expressions.go", load_fixture("expressions.go")),
        ("control_flow.go", load_fixture("control_flow.go")),
        ("structs.go", load_fixture("structs.go")),
    ];

    for (name, code) in fixtures.iter() {
        let bytes = code.len();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), code, |b, code| {
            b.iter(|| {
                let _ = black_box(parse_module(code).unwrap());
            });
        });
    }

    group.finish();
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_field_access_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_access_collection");

    for size in [50, 100, 200].iter() {
        let code = generate_access_code(*size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_funcs", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let module = parse_module(code).unwrap();
                    let _ = black_box(FieldAccessCollector::collect(&module, "Field"));
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Codegen Benchmarks
// =============================================================================

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");

    for size in [50, 100, 200].iter() {
        let code = generate_struct_code(*size);
        let module = parse_module(&code).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_structs", size)),
            &module,
            |b, module| {
                b.iter(|| {
                    let mut state = CodegenState::default();
                    module.codegen(&mut state);
                    let _ = black_box(state.to_string());
                });
            },
        );
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for size in [50, 100].iter() {
        let code = generate_struct_code(*size);
        let bytes = code.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_structs", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let module = parse_module(code).unwrap();
                    let mut state = CodegenState::default();
                    module.codegen(&mut state);
                    let _ = black_box(state.to_string());
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Benchmark Groups
// =============================================================================

criterion_group!(
    parsing,
    bench_parse_simple,
    bench_parse_structs,
    bench_parse_fixtures,
);

criterion_group!(analysis, bench_field_access_collection,);

criterion_group!(codegen, bench_codegen, bench_roundtrip,);

criterion_main!(parsing, analysis, codegen);
