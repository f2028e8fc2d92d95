use cryptal_core::keys::rsa::{KeyPair, RsaParams};
use cryptal_core::primitives::BigInt;
use cryptal_core::rng::Csprng;
use cryptal_core::signatures::{digital_signature, dsa};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_mod_exp(c: &mut Criterion) {
    let keys = KeyPair::generate_with(&RsaParams::default(), &mut Csprng::from_seed([7; 32]))
        .expect("key generation");
    let n = keys.public.modulus();
    let base = BigInt::from_u64(0x1234_5678_9abc_def0);

    c.bench_function("mod_exp 2048 public", |b| {
        b.iter(|| black_box(&base).mod_exp(keys.public.exponent(), n))
    });

    let mut group = c.benchmark_group("rsa 2048 private");
    group.sample_size(10);
    group.bench_function("mod_exp full width", |b| {
        b.iter(|| black_box(&base).mod_exp(keys.private.exponent(), n))
    });
    group.bench_function("digital_signature::sign", |b| {
        b.iter(|| digital_signature::sign(black_box(b"benchmark"), &keys))
    });
    group.bench_function("dsa::sign", |b| b.iter(|| dsa::sign(black_box(b"benchmark"), &keys)));
    group.finish();
}

criterion_group!(benches, bench_mod_exp);
criterion_main!(benches);
