//! Benchmarks for CaskKV store operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use caskkv::Store;
use tempfile::TempDir;

const KEY_COUNT: usize = 10_000;

fn populated_store(dir: &TempDir) -> Store {
    let mut store = Store::open_path(dir.path().join("bench.db")).unwrap();
    for i in 0..KEY_COUNT {
        let key = format!("key{:08}", i);
        store.set(key.as_bytes(), &[0xAB; 100]).unwrap();
    }
    store
}

fn store_benchmarks(c: &mut Criterion) {
    // Sequential write throughput
    c.bench_function("set_100b", |b| {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open_path(dir.path().join("bench.db")).unwrap();
        let value = [0xCDu8; 100];
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key{:08}", i % KEY_COUNT as u64);
            store.set(key.as_bytes(), &value).unwrap();
            i += 1;
        });
    });

    // Scattered read throughput
    c.bench_function("get_100b", |b| {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);
        let mut i = 0usize;
        b.iter(|| {
            let key = format!("key{:08}", (i * 7919) % KEY_COUNT);
            black_box(store.get(key.as_bytes()).unwrap());
            i += 1;
        });
    });

    // Startup replay of a populated log
    c.bench_function("replay_10k", |b| {
        let dir = TempDir::new().unwrap();
        populated_store(&dir).close().unwrap();
        let path = dir.path().join("bench.db");
        b.iter_batched(
            || path.clone(),
            |path| black_box(Store::open_path(path).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
