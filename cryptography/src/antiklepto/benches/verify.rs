use antiklepto_cryptography::antiklepto::{mocks::Signer, verify, HostNonce, Variant};
use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn benchmark_verify(c: &mut Criterion) {
    let mut sampler = StdRng::seed_from_u64(0);
    for variant in [Variant::Tagged, Variant::Legacy] {
        let mut signer = Signer::new(&mut sampler, variant);
        let host_nonce = HostNonce::random(&mut sampler);
        let signer_commitment = signer
            .commit(&mut sampler, &host_nonce.commit(variant))
            .unwrap();
        let signature = signer.sign(&host_nonce, &[0x42; 32]).unwrap();
        c.bench_function(&format!("{}/variant={}", module_path!(), variant), |b| {
            b.iter(|| {
                black_box(verify(
                    variant,
                    host_nonce.as_ref(),
                    &signer_commitment,
                    &signature,
                ))
            });
        });
    }
}

criterion_group!(benches, benchmark_verify);
