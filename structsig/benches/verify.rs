use criterion::{Criterion, black_box, criterion_group, criterion_main};
use structsig::{
    SecretKey, SignatureConfig, StructureFunction, TrajectoryPoint, VerifierConfig,
    derive_parameters,
};

fn bench_derive(c: &mut Criterion) {
    c.bench_function("derive_parameters", |bencher| {
        bencher.iter(|| {
            let f = derive_parameters(black_box(b"test-key"), black_box("structure"))
                .expect("derive");
            black_box(f);
        })
    });
}

fn bench_check_trajectory(c: &mut Criterion) {
    let key = SecretKey::new(b"test-key".to_vec()).expect("key");
    let verifier = key.verifier(VerifierConfig::new(0.01)).expect("verifier");
    let points: Vec<TrajectoryPoint> = (0..64)
        .map(|i| {
            let x = f64::from(i) * 0.25;
            TrajectoryPoint::new(x, verifier.function().phi(x) + 0.001)
        })
        .collect();

    c.bench_function("check_trajectory_64", |bencher| {
        bencher.iter(|| {
            let report = verifier
                .check_trajectory(black_box(&points), None)
                .expect("check");
            black_box(report);
        })
    });
}

fn bench_sign_verify(c: &mut Criterion) {
    let key = SecretKey::new(b"test-key".to_vec()).expect("key");
    let config = SignatureConfig::default();
    let sig = key.sign(b"Test 123", &config).expect("sign");

    c.bench_function("structsig_sign", |bencher| {
        bencher.iter(|| {
            let sig = key.sign(black_box(b"Test 123"), &config).expect("sign");
            black_box(sig);
        })
    });

    c.bench_function("structsig_verify", |bencher| {
        bencher.iter(|| {
            let ok = key
                .verify(black_box(b"Test 123"), black_box(&sig), &config)
                .expect("verify");
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_derive, bench_check_trajectory, bench_sign_verify);
criterion_main!(benches);
