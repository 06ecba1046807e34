//! Operation Benchmarks
//!
//! Throughput of the four operations on synthetic signals of about a
//! minute of 44.1 kHz audio.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use splicer::engine::generate::{generate_test_signal, DEFAULT_SAMPLE_RATE};
use splicer::{combine, separate, CombineOp, SeparateOp};

const BASE_SAMPLES: usize = 2_621_440;
const ADD_SAMPLES: usize = 441_000;
const POSITION: usize = 50_000;

fn benchmark_combine(c: &mut Criterion) {
    let base = generate_test_signal(BASE_SAMPLES, DEFAULT_SAMPLE_RATE, 43).samples;
    let add = generate_test_signal(ADD_SAMPLES, DEFAULT_SAMPLE_RATE, 44).samples;

    c.bench_function("insert_60s", |b| {
        b.iter(|| combine(black_box(&base), black_box(&add), POSITION, CombineOp::insert()))
    });

    c.bench_function("mix_60s", |b| {
        b.iter(|| combine(black_box(&base), black_box(&add), POSITION, CombineOp::mix(0.5)))
    });
}

fn benchmark_separate(c: &mut Criterion) {
    let base = generate_test_signal(BASE_SAMPLES, DEFAULT_SAMPLE_RATE, 43).samples;
    let add = generate_test_signal(ADD_SAMPLES, DEFAULT_SAMPLE_RATE, 44).samples;
    let inserted = combine(&base, &add, POSITION, CombineOp::insert());
    let mixed = combine(&base, &add, POSITION, CombineOp::mix(0.5));

    c.bench_function("remove_60s", |b| {
        b.iter(|| separate(black_box(&inserted), black_box(&add), POSITION, SeparateOp::Remove))
    });

    c.bench_function("unmix_60s", |b| {
        b.iter(|| separate(black_box(&mixed), black_box(&add), POSITION, SeparateOp::unmix(0.5)))
    });
}

criterion_group!(benches, benchmark_combine, benchmark_separate);
criterion_main!(benches);
