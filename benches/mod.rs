use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    protocol::bench_scan,
    protocol::bench_tokenize,
    protocol::bench_dispatch
);
criterion_main!(benches);
