#![allow(dead_code)]

use uid_index::index::random::{reseed, tl_rand_below};
use uid_index::{ShardedUidIndex, StorageIndex, Uid, UidIndex};

pub const POPULATION: u64 = 1 << 15;
pub const TIMESTEPS: u64 = 365 * 100;
pub const MAX_CHILDREN: u64 = 8;

pub const BIRTHS_SMALL: u64 = 5_000;
pub const BIRTHS_MED: u64 = 30_000;

/// Distinct birth days in a clustered run; each (day, child) pair costs one
/// serial-number array of `POPULATION` slots.
pub const BIRTH_DAYS: u64 = 20;

pub fn make_index() -> UidIndex {
    UidIndex::new(POPULATION, TIMESTEPS).expect("benchmark layout must be valid")
}

pub fn make_sharded() -> ShardedUidIndex {
    ShardedUidIndex::new(POPULATION, TIMESTEPS).expect("benchmark layout must be valid")
}

/// Founders all born on tick 0: one day table, densely filled.
pub fn founder_births(index: &UidIndex, count: u64) -> Vec<(Uid, StorageIndex)> {
    (0..count).map(|i| (index.encode(i, 0, 0), i)).collect()
}

/// Births clustered on a few days, the shape a real run produces.
pub fn clustered_births(index: &UidIndex, count: u64) -> Vec<(Uid, StorageIndex)> {
    reseed(0xB1E7);
    (0..count)
        .map(|i| {
            let time = tl_rand_below(BIRTH_DAYS) * (TIMESTEPS / BIRTH_DAYS);
            let uid = index.encode(tl_rand_below(POPULATION), time, tl_rand_below(MAX_CHILDREN));
            (uid, i)
        })
        .collect()
}

pub fn populate(index: &mut UidIndex, births: &[(Uid, StorageIndex)]) {
    for &(uid, storage) in births {
        index.insert(uid, storage).expect("benchmark uid must be in range");
    }
}
