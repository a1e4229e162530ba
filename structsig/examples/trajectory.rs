use rand::SeedableRng;
use rand::rngs::StdRng;
use structsig::{
    AggregatePolicy, SecretKey, SignatureConfig, StructureFunction, TrajectoryLog,
    TrajectoryPoint, Variant, VerifierConfig, search_key,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key = SecretKey::new(b"test-key".to_vec()).expect("key");
    let config = VerifierConfig::new(0.05)
        .with_variant(Variant::Randomized { scale: 0.01 })
        .with_policy(AggregatePolicy::Majority);
    let verifier = key.verifier(config).expect("verifier");

    // Observed behavior drifts away from φ as x grows.
    let points: Vec<TrajectoryPoint> = (0..20)
        .map(|i| {
            let x = f64::from(i) * 0.5;
            TrajectoryPoint::new(x, verifier.function().phi(x) + 0.004 * f64::from(i))
        })
        .collect();

    let mut log = TrajectoryLog::new();
    let report = verifier
        .check_trajectory(&points, Some(&mut log))
        .expect("check");
    println!(
        "trajectory: {} ({}/{} points valid)",
        report.verdict,
        report.valid_count(),
        report.checks.len()
    );
    println!("log: {}", log.to_json().expect("json"));

    let log_bytes = log.to_bytes().expect("encode log");
    let decoded = TrajectoryLog::from_bytes(&log_bytes).expect("decode log");
    assert_eq!(decoded, log);

    let message = b"Test 123";
    let sig_config = SignatureConfig::default();
    let sig = key.sign(message, &sig_config).expect("sign");
    let ok = key.verify(message, &sig, &sig_config).expect("verify");
    println!("fixed key: delta={:.6} sig={} verified={ok}", sig.delta, sig.digest_hex());

    let mut rng = StdRng::seed_from_u64(42);
    let (best_key, best) = search_key(&mut rng, message, 50, &sig_config).expect("search");
    let ok = best_key.verify(message, &best, &sig_config).expect("verify");
    let sig_bytes = bincode::serialize(&best).expect("serialize sig");
    println!(
        "best of 50: delta={:.6} sig={} verified={ok} ({} bytes)",
        best.delta,
        best.digest_hex(),
        sig_bytes.len()
    );
}
