use std::hint::black_box;

use criterion::*;

mod common;
use common::*;

fn lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let mut index = make_index();
    let births = clustered_births(&index, BIRTHS_MED);
    populate(&mut index, &births);

    group.bench_function("lookup_med_hits", |b| {
        b.iter(|| {
            let mut total = 0u64;
            for &(uid, _) in &births {
                total = total.wrapping_add(index.lookup(uid).expect("bound uid"));
            }
            black_box(total);
        });
    });

    let misses: Vec<_> = births
        .iter()
        .map(|&(uid, _)| {
            let parts = index.decode(uid);
            index.encode(parts.serial_number, parts.time(index.layout()) + 1, parts.child_slot)
        })
        .collect();

    group.bench_function("lookup_med_misses", |b| {
        b.iter(|| {
            let found = misses.iter().filter(|&&uid| index.contains(uid)).count();
            black_box(found);
        });
    });

    group.finish();
}

criterion_group!(benches, lookup_benchmark);
criterion_main!(benches);
