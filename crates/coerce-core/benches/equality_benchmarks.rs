//! Equality Performance Benchmarks
//!
//! Run with: `cargo bench -p coerce-core`

use coerce_core::{Value, loose_equals, number_to_string, strict_equals, string_to_number};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_loose_equality(c: &mut Criterion) {
    let number = Value::number(42.0);
    let text = Value::string("42");
    let array = Value::array([Value::int32(42)]);

    c.bench_function("loose_number_number", |b| {
        b.iter(|| loose_equals(black_box(&number), black_box(&number)))
    });

    c.bench_function("loose_number_string", |b| {
        b.iter(|| loose_equals(black_box(&number), black_box(&text)))
    });

    c.bench_function("loose_array_number", |b| {
        b.iter(|| loose_equals(black_box(&array), black_box(&number)))
    });

    c.bench_function("strict_number_string", |b| {
        b.iter(|| strict_equals(black_box(&number), black_box(&text)))
    });
}

fn bench_number_text(c: &mut Criterion) {
    c.bench_function("string_to_number_decimal", |b| {
        b.iter(|| string_to_number(black_box("  -1234.5678e-3 ")))
    });

    c.bench_function("number_to_string_fraction", |b| {
        b.iter(|| number_to_string(black_box(0.1 + 0.2)))
    });
}

criterion_group!(benches, bench_loose_equality, bench_number_text);
criterion_main!(benches);
