use antiklepto_cryptography::antiklepto::{HostNonce, Variant};
use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn benchmark_commit(c: &mut Criterion) {
    let mut sampler = StdRng::seed_from_u64(0);
    let host_nonce = HostNonce::random(&mut sampler);
    for variant in [Variant::Tagged, Variant::Legacy] {
        c.bench_function(&format!("{}/variant={}", module_path!(), variant), |b| {
            b.iter(|| black_box(host_nonce.commit(variant)));
        });
    }
}

criterion_group!(benches, benchmark_commit);
