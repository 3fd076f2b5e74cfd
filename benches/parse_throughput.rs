//! Scanner and parser throughput benchmarks
//!
//! Measures:
//! - Scanning alone versus scanning plus parsing over typical mapping expressions
//! - Scaling with operator chain length (1, 10, 100, 1000 operands)
//! - Scaling with nesting depth (groups and filters)
//!
//! Run benchmarks: `cargo bench --bench parse_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mel::{ExpressionParser, ParserConfig, scan};
use std::hint::black_box;

/// Expressions of the kind found in document mappings.
fn sample_expressions() -> &'static [(&'static str, &'static str)] {
    &[
        ("variable", "$rate"),
        ("path", "/invoice/header/customer/@id"),
        ("predicate", "/order/line[@sku = 'A1' and @qty > 0][1]/price"),
        ("call", "$fmt(sum(line/@qty) div count(line), 'n2')"),
        ("union", "/a/b | $(c/d) | ../e/@f | ns:g/*"),
        ("arithmetic", "(price * qty - discount) mod 100 + tax * 0.25"),
    ]
}

fn benchmark_scan_vs_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_vs_parse");
    let parser = ExpressionParser::default();

    for (name, text) in sample_expressions() {
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("scan", name), text, |b, text| {
            b.iter(|| scan(black_box(text)).expect("Failed to scan expression"));
        });

        group.bench_with_input(BenchmarkId::new("parse", name), text, |b, text| {
            b.iter(|| parser.parse(black_box(text)).expect("Failed to parse expression"));
        });
    }

    group.finish();
}

/// Benchmark operator chains of increasing length
fn benchmark_chain_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_length");
    let parser = ExpressionParser::default();

    for count in [1, 10, 100, 1000] {
        let text = (0..count)
            .map(|i| format!("$v{i} * {i}"))
            .collect::<Vec<_>>()
            .join(" + ");
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("operands", count), &text, |b, text| {
            b.iter(|| parser.parse(black_box(text)).expect("Failed to parse chain"));
        });
    }

    group.finish();
}

/// Benchmark nested groups and filters up to the configured depth
fn benchmark_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");
    let parser = ExpressionParser::new(ParserConfig::default().with_max_depth(512));

    for depth in [4, 32, 100] {
        let groups = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let filters = format!("a{}{}", "[b".repeat(depth), "]".repeat(depth));

        group.bench_with_input(BenchmarkId::new("groups", depth), &groups, |b, text| {
            b.iter(|| parser.parse(black_box(text)).expect("Failed to parse groups"));
        });
        group.bench_with_input(BenchmarkId::new("filters", depth), &filters, |b, text| {
            b.iter(|| parser.parse(black_box(text)).expect("Failed to parse filters"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_scan_vs_parse,
    benchmark_chain_length,
    benchmark_nesting_depth
);
criterion_main!(benches);
