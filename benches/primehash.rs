#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use primehash::HashTable;
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<String>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut prime_table = HashTable::new().unwrap();
    let mut rust_map = HashMap::new();
    group.bench_function("primehash insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                prime_table.insert(key, value).unwrap();
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("primehash search", |b| {
        b.iter(|| items.iter().filter(|(key, _)| prime_table.search(key).is_some()).count());
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.get(key).is_some()).count());
    });
    group.bench_function("primehash insert then delete", |b| {
        b.iter(|| {
            let mut table = HashTable::new().unwrap();
            for (key, value) in &items {
                table.insert(key.as_str(), value.as_str()).unwrap();
            }
            items.iter().filter(|(key, _)| table.delete(key).unwrap().is_some()).count()
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
