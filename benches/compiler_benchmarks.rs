// C-flat - A compiler for the C-flat teaching language targeting a MIPS-style stack machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for the C-flat compiler.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use cflat::analyzer::{self, Annotations};
use cflat::codegen::{self, CodegenOptions};
use cflat::CompilationContext;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Benchmark Inputs
// ============================================================================

/// A program with `functions` functions, each with a loop, a branch and a
/// struct local, plus a `main` calling all of them.
fn generate_program(functions: usize) -> String {
    let mut source = String::from("struct Point { int x; int y; };\nint total;\n\n");
    for i in 0..functions {
        source.push_str(&format!(
            "int f{i}(int n, bool flag) {{\n\
             \x20   int i;\n\
             \x20   struct Point p;\n\
             \x20   i = 0;\n\
             \x20   p.x = n * {i};\n\
             \x20   while (i < n) {{\n\
             \x20       if (flag && i != 3) {{ p.y = p.y + i; }} else {{ p.y = p.y - 1; }}\n\
             \x20       i++;\n\
             \x20   }}\n\
             \x20   return p.x + p.y;\n\
             }}\n\n"
        ));
    }
    source.push_str("void main() {\n");
    for i in 0..functions {
        source.push_str(&format!("    total = total + f{}({}, true);\n", i, i));
    }
    source.push_str("    cout << \"total: \";\n    cout << total;\n}\n");
    source
}

fn inputs() -> [(&'static str, String); 3] {
    [
        ("small", generate_program(1)),
        ("medium", generate_program(20)),
        ("large", generate_program(200)),
    ]
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, source) in inputs() {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", name), &source, |b, src| {
            b.iter(|| cflat::lexer::tokenize(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, source) in inputs() {
        let tokens = cflat::lexer::tokenize(&source).unwrap();
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", name), &tokens, |b, tokens| {
            b.iter(|| cflat::parser::parse(black_box(tokens)))
        });
    }

    group.finish();
}

// ============================================================================
// Analyzer Benchmarks
// ============================================================================

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");

    for (name, source) in inputs() {
        let tokens = cflat::lexer::tokenize(&source).unwrap();
        let program = cflat::parser::parse(&tokens).unwrap();

        group.bench_with_input(BenchmarkId::new("analyze", name), &program, |b, program| {
            b.iter(|| {
                let mut annotations = Annotations::new();
                let mut ctx = CompilationContext::new(&source);
                analyzer::resolve(black_box(program), &mut annotations, &mut ctx);
                analyzer::check(program, &mut annotations, &mut ctx);
                analyzer::assign_layout(program, &mut annotations);
                annotations
            })
        });
    }

    group.finish();
}

// ============================================================================
// Code Generation Benchmarks
// ============================================================================

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");

    for (name, source) in inputs() {
        let tokens = cflat::lexer::tokenize(&source).unwrap();
        let program = cflat::parser::parse(&tokens).unwrap();
        let mut annotations = Annotations::new();
        let mut ctx = CompilationContext::new(&source);
        assert!(analyzer::resolve(&program, &mut annotations, &mut ctx));
        assert!(analyzer::check(&program, &mut annotations, &mut ctx));
        analyzer::assign_layout(&program, &mut annotations);

        group.bench_with_input(BenchmarkId::new("generate", name), &program, |b, program| {
            b.iter(|| {
                let mut ctx = CompilationContext::new(&source);
                codegen::generate(
                    black_box(program),
                    &annotations,
                    &mut ctx,
                    CodegenOptions::default(),
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Compilation Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (name, source) in inputs() {
        group.throughput(Throughput::Elements(source.lines().count() as u64));
        group.bench_with_input(BenchmarkId::new("full", name), &source, |b, src| {
            b.iter(|| cflat::compile(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Micro-Benchmarks
// ============================================================================

fn bench_micro(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro");

    let cases = [
        ("minimal_program", "void main() { }"),
        ("hello_world", "void main() { cout << \"Hello\\n\"; }"),
        ("arithmetic_expr", "int x; void main() { x = 1 + 2 * 3 - 4 / 2; }"),
        (
            "function_call",
            "int foo() { return 42; } int x; void main() { x = foo(); }",
        ),
        (
            "while_loop",
            "void main() { int i; i = 0; while (i < 10) { i++; } }",
        ),
        (
            "short_circuit",
            "bool a; bool b; void main() { if (a && b || !a) { cout << 1; } }",
        ),
    ];

    for (name, source) in cases {
        group.bench_function(name, |b| b.iter(|| cflat::compile(black_box(source))));
    }

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for count in [1, 10, 50, 200] {
        let mut source = String::from("void main() {\n");
        for i in 0..count {
            source.push_str(&format!("    int v{};\n", i));
        }
        for i in 0..count {
            source.push_str(&format!("    v{} = {};\n", i, i));
        }
        source.push_str("}\n");

        group.bench_with_input(BenchmarkId::new("locals", count), &source, |b, src| {
            b.iter(|| cflat::compile(black_box(src)))
        });
    }

    for count in [1, 10, 50] {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("int f{}(int a) {{ return a + {}; }}\n", i, i));
        }
        source.push_str("int x;\nvoid main() {\n");
        for i in 0..count {
            source.push_str(&format!("    x = f{}(x);\n", i));
        }
        source.push_str("}\n");

        group.bench_with_input(BenchmarkId::new("functions", count), &source, |b, src| {
            b.iter(|| cflat::compile(black_box(src)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer,
    bench_parser,
    bench_analyzer,
    bench_codegen,
    bench_compile,
    bench_micro,
    bench_scaling,
);
criterion_main!(benches);
