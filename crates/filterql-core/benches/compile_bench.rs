//! Benchmarks for the filter lexer and compiler

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use filterql_core::{compile, FieldSchema, FieldSpec, Lexer, MatchStyle, ValueKind};

const SIMPLE: &str = "status:published";
const COMPLEX: &str =
    "title:phone AND price:10..50 OR NOT tag:\"clearance\" AND (active:true OR price:>=100)";

fn schema() -> FieldSchema {
    FieldSchema::new()
        .with("status", FieldSpec::equality(ValueKind::Text))
        .with("title", FieldSpec::text(MatchStyle::ContainsIgnoreCase))
        .with("tag", FieldSpec::text(MatchStyle::Exact))
        .with("price", FieldSpec::range(ValueKind::Number))
        .with("active", FieldSpec::equality(ValueKind::Boolean))
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, input) in [("simple_query", SIMPLE), ("complex_query", COMPLEX)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let tokens: Vec<_> = Lexer::new(black_box(input)).collect();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let schema = schema();
    let mut group = c.benchmark_group("compile");
    group.throughput(Throughput::Bytes(COMPLEX.len() as u64));

    group.bench_function("complex_query", |b| {
        b.iter(|| black_box(compile(black_box(COMPLEX), &schema)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_compile);
criterion_main!(benches);
