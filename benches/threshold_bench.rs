use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tbls::{G1Scheme, PairingEngine, PrivatePoly, SignatureScheme, ThresholdSigner};

/// Threshold signing flow with the sharing done once:
/// - polynomial sampling and commitment happen outside measured loops
/// - a single partial signature is measured
/// - recovery (verify every share, interpolate, verify the result) is measured
pub fn bench_threshold(c: &mut Criterion) {
    // Deterministic RNG for repeatable benchmarks
    let mut rng = StdRng::seed_from_u64(0xdead_beef);

    let signer = ThresholdSigner::new(G1Scheme::<PairingEngine>::new());

    // Parameters
    let parties = 16usize;
    let threshold = 11usize;

    // One-time setup (not measured)
    let poly = PrivatePoly::new(threshold, None, &mut rng).expect("polynomial");
    let public_poly = poly.commit(&signer.scheme().public_base());
    let shares = poly.shares(parties).expect("shares");
    let message = b"The quick brown fox jumps over the lazy dog";

    c.bench_function("threshold_partial_sign", |b| {
        b.iter(|| {
            let partial = signer
                .partial_sign(black_box(&shares[0]), message)
                .expect("partial_sign failed");
            black_box(partial);
        })
    });

    let partials: Vec<_> = shares
        .iter()
        .take(threshold)
        .map(|share| signer.partial_sign(share, message).expect("partial_sign failed"))
        .collect();

    c.bench_function("threshold_recover", |b| {
        b.iter(|| {
            let recovery = signer
                .recover(&public_poly, message, black_box(&partials), threshold, parties)
                .expect("recover failed");
            black_box(recovery);
        })
    });
}

criterion_group!(benches, bench_threshold);
criterion_main!(benches);
