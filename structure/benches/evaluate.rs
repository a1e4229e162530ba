use criterion::{black_box, criterion_group, criterion_main, Criterion};
use structure::{Harmonic, LogCosine, Sine, StructureFunction, Variant};

fn log_cosine() -> LogCosine {
    LogCosine::new([
        Harmonic::new(1.5, 3.25, 0.5),
        Harmonic::new(2.0, 7.0, 1.25),
        Harmonic::new(1.0, 12.5, 4.0),
    ])
}

fn bench_sine_fixed(c: &mut Criterion) {
    let f = Sine::new(1.0, 417.0, 0.0);
    c.bench_function("sine_fixed", |bencher| {
        bencher.iter(|| black_box(f.evaluate(black_box(0.25), Variant::Fixed)))
    });
}

fn bench_log_cosine_fixed(c: &mut Criterion) {
    let f = log_cosine();
    c.bench_function("log_cosine_fixed", |bencher| {
        bencher.iter(|| black_box(f.evaluate(black_box(12_345.0), Variant::Fixed)))
    });
}

fn bench_log_cosine_randomized(c: &mut Criterion) {
    let f = log_cosine();
    let variant = Variant::Randomized { scale: 0.05 };
    c.bench_function("log_cosine_randomized", |bencher| {
        bencher.iter(|| black_box(f.evaluate(black_box(12_345.0), variant)))
    });
}

criterion_group!(
    benches,
    bench_sine_fixed,
    bench_log_cosine_fixed,
    bench_log_cosine_randomized
);
criterion_main!(benches);
