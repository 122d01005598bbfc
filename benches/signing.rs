//! Benchmarks for request authorization
//!
//! This benchmark measures:
//! - A fresh RSA signature per call (cache bypassed)
//! - A cached token lookup inside the TTL window
//! - Envelope classification of a failed business response

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use std::time::{Duration, UNIX_EPOCH};

use wujie_sdk::response::decode_data;
use wujie_sdk::{ApiResponse, Credentials, ErrorContext};

fn credentials() -> Credentials {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let der = key.to_pkcs8_der().unwrap();
    Credentials::new("bench-app", &STANDARD.encode(der.as_bytes())).unwrap()
}

fn bench_authorization(c: &mut Criterion) {
    let creds = credentials();
    let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let mut group = c.benchmark_group("authorization");

    group.bench_function("sign_uncached", |b| {
        b.iter(|| creds.sign(black_box(now)).unwrap())
    });

    creds.authorization_at(now).unwrap();
    group.bench_function("cached_within_ttl", |b| {
        b.iter(|| creds.authorization_at(black_box(now + Duration::from_secs(60))).unwrap())
    });

    group.bench_function("wall_clock", |b| b.iter(|| creds.authorization().unwrap()));

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let resp = ApiResponse::new(
        StatusCode::OK,
        HeaderMap::new(),
        Bytes::from_static(br#"{"code":"20110010","message":"points","success":false,"data":null}"#),
    );

    c.bench_function("classify_business_error", |b| {
        b.iter(|| {
            let res = decode_data::<serde_json::Value>(black_box(&resp), ErrorContext::new());
            black_box(res.is_err())
        })
    });
}

criterion_group!(benches, bench_authorization, bench_classification);
criterion_main!(benches);
