//! Bit layout derived from capacity parameters.
//!
//! [`BitLayout`] is computed once per index and never mutated. It owns the
//! field widths, shift offsets and masks used by the codec, and the lengths
//! of every table level.
//!
//! ## Derivation
//!
//! ```text
//! population_bits = ceil(log2(initial_population_size))
//! time_bits       = ceil(log2(number_of_timesteps))
//! child_bits      = ceil(log2(max_children))
//! day_bits        = ceil(log2(year_size))
//! year_bits       = time_bits - day_bits
//!
//! serial_offset   = child_bits + time_bits
//! child_offset    = time_bits
//! ```
//!
//! ## Validation
//!
//! Construction rejects layouts that the index could not honour:
//!
//! - any capacity parameter equal to zero,
//! - `day_bits > time_bits` (a year longer than the whole simulation),
//! - `population_bits + child_bits + time_bits > 64`,
//! - any single table level wider than [`MAX_TABLE_BITS`].

use std::fmt;

use crate::index::config::IndexConfig;
use crate::index::error::{CapacityParameter, ConfigError, UidField};
use crate::index::types::{mask, Bits, MAX_TABLE_BITS, UID_BITS};


/// Returns the number of bits needed to address `n` distinct values.
///
/// `ceil_log2(1) == 0`; a capacity of one needs no bits at all.
///
/// ```
/// use uid_index::index::layout::ceil_log2;
///
/// assert_eq!(ceil_log2(10_000), 14);
/// assert_eq!(ceil_log2(256), 8);
/// assert_eq!(ceil_log2(257), 9);
/// ```
#[inline]
pub const fn ceil_log2(n: u64) -> Bits {
    if n <= 1 { 0 } else { (u64::BITS - (n - 1).leading_zeros()) as Bits }
}

/// Field widths, offsets and table dimensions for one index.
///
/// ## Invariants
/// - `day_bits <= time_bits`
/// - `population_bits + child_bits + time_bits <= 64`
/// - every level width (`year_bits`, `child_bits`, `day_bits`,
///   `population_bits`) is at most [`MAX_TABLE_BITS`]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitLayout {
    population_bits: Bits,
    time_bits: Bits,
    child_bits: Bits,
    day_bits: Bits,
    year_bits: Bits,
}

impl BitLayout {
    /// Derives and validates a layout from capacity parameters.
    pub fn from_config(config: &IndexConfig) -> Result<Self, ConfigError> {
        let parameters = [
            (config.initial_population_size, CapacityParameter::InitialPopulationSize),
            (config.number_of_timesteps, CapacityParameter::NumberOfTimesteps),
            (config.max_children, CapacityParameter::MaxChildren),
            (config.year_size, CapacityParameter::YearSize),
        ];
        if let Some((_, parameter)) = parameters.iter().find(|(value, _)| *value == 0) {
            return Err(ConfigError::ZeroCapacity(*parameter));
        }

        let population_bits = ceil_log2(config.initial_population_size);
        let time_bits = ceil_log2(config.number_of_timesteps);
        let child_bits = ceil_log2(config.max_children);
        let day_bits = ceil_log2(config.year_size);

        if day_bits > time_bits {
            return Err(ConfigError::YearExceedsTime { day_bits, time_bits });
        }
        let year_bits = time_bits - day_bits;

        let total_bits = population_bits as u32 + child_bits as u32 + time_bits as u32;
        if total_bits > UID_BITS as u32 {
            return Err(ConfigError::WidthOverflow { total_bits, limit: UID_BITS });
        }

        let levels = [
            (UidField::Year, year_bits),
            (UidField::ChildSlot, child_bits),
            (UidField::Day, day_bits),
            (UidField::SerialNumber, population_bits),
        ];
        for (level, bits) in levels {
            if bits > MAX_TABLE_BITS {
                return Err(ConfigError::TableTooWide { level, bits, limit: MAX_TABLE_BITS });
            }
        }

        Ok(Self { population_bits, time_bits, child_bits, day_bits, year_bits })
    }

    #[inline] pub const fn population_bits(&self) -> Bits { self.population_bits }
    #[inline] pub const fn time_bits(&self) -> Bits { self.time_bits }
    #[inline] pub const fn child_bits(&self) -> Bits { self.child_bits }
    #[inline] pub const fn day_bits(&self) -> Bits { self.day_bits }
    #[inline] pub const fn year_bits(&self) -> Bits { self.year_bits }

    /// Shift of the serial number field.
    #[inline] pub const fn serial_offset(&self) -> Bits { self.child_bits + self.time_bits }
    /// Shift of the child slot field.
    #[inline] pub const fn child_offset(&self) -> Bits { self.time_bits }

    #[inline] pub const fn serial_mask(&self) -> u64 { mask(self.population_bits) }
    #[inline] pub const fn child_mask(&self) -> u64 { mask(self.child_bits) }
    #[inline] pub const fn time_mask(&self) -> u64 { mask(self.time_bits) }
    #[inline] pub const fn day_mask(&self) -> u64 { mask(self.day_bits) }
    #[inline] pub const fn year_mask(&self) -> u64 { mask(self.year_bits) }

    /// Length of the level-1 (year) table.
    #[inline] pub const fn year_count(&self) -> usize { 1usize << self.year_bits }
    /// Length of each level-2 (child slot) table.
    #[inline] pub const fn child_count(&self) -> usize { 1usize << self.child_bits }
    /// Length of each level-3 (day) table.
    #[inline] pub const fn day_count(&self) -> usize { 1usize << self.day_bits }
    /// Length of each level-4 (serial number) array.
    #[inline] pub const fn serial_count(&self) -> usize { 1usize << self.population_bits }
}

impl fmt::Display for BitLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pop_bits={}, time_bits={}, child_bits={}, year_bits={}",
            self.population_bits, self.time_bits, self.child_bits, self.year_bits
        )
    }
}
