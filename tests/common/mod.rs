#![allow(dead_code)]

use std::sync::Once;

use uid_index::{ShardedUidIndex, UidIndex};

/// Population of the reference run (20 simulated years at 365 ticks each).
pub const POPULATION: u64 = 10_000;
pub const TIMESTEPS: u64 = 365 * 20;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn reference_index() -> UidIndex {
    init_logging();
    UidIndex::new(POPULATION, TIMESTEPS).unwrap()
}

pub fn reference_sharded() -> ShardedUidIndex {
    init_logging();
    ShardedUidIndex::new(POPULATION, TIMESTEPS).unwrap()
}
