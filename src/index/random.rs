//! Thread-local pseudo-random numbers for simulation drivers.
//!
//! The index itself is deterministic and never draws random numbers. This
//! module exists for the code that exercises it: demo drivers that scatter
//! births over the simulated timeline, the integration tests, and the
//! benches.
//!
//! The generator is a **thread-local xorshift64\*** with a fixed non-zero
//! default seed, so a single-threaded driver produces the same sequence of
//! UIDs on every run unless it calls [`reseed`].
//!
//! Not cryptographically secure.

use std::cell::Cell;
use std::thread_local;


const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

thread_local! {static TL_RNG: Cell<u64> = const { Cell::new(DEFAULT_SEED) };}

/// Resets this thread's generator.
///
/// A zero seed would lock xorshift at zero forever, so it is replaced by the
/// default seed.
pub fn reseed(seed: u64) {
    TL_RNG.with(|c| c.set(if seed == 0 { DEFAULT_SEED } else { seed }));
}

/// Returns a pseudo-random `u64` from this thread's generator.
///
/// ## Example
/// ```
/// use uid_index::index::random::tl_rand_u64;
///
/// assert_ne!(tl_rand_u64(), tl_rand_u64());
/// ```
#[inline]
pub fn tl_rand_u64() -> u64 {
    TL_RNG.with(|c| {
        let mut x = c.get();
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        c.set(x);
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    })
}

/// Returns a pseudo-random value in `0..bound`.
///
/// Uses the widening-multiply reduction, which is unbiased enough for
/// simulation sampling and avoids a division. Returns 0 when `bound` is 0.
#[inline]
pub fn tl_rand_below(bound: u64) -> u64 {
    ((tl_rand_u64() as u128 * bound as u128) >> 64) as u64
}
