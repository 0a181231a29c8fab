//! Error types for index construction, insertion and lookup.
//!
//! Each failure mode of the index is modelled by a small, dedicated type that
//! carries enough context to be actionable in a log line:
//!
//! * [`ConfigError`]: the capacity parameters cannot produce a usable layout.
//! * [`OutOfRangeError`]: a decoded coordinate, or a caller-supplied field,
//!   does not fit the configured table dimensions.
//! * [`NotFoundError`]: a lookup or removal targeted a UID with no binding.
//!
//! Operations on the index return the aggregate [`IndexError`], and every
//! low-level type converts into it via `From`, so callers can bubble failures
//! with `?` and still `match` on the precise cause.
//!
//! None of these conditions are transient. They are configuration or
//! programming errors from the caller's point of view and are never retried
//! internally.
//!
//! ## Example
//! ```ignore
//! match index.lookup(uid) {
//!     Ok(slot) => storage[slot as usize].age += 1,
//!     Err(IndexError::NotFound(e)) => log::warn!("{e}"),
//!     Err(other) => return Err(other),
//! }
//! ```
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] gives short single-line messages for logs.
//! * [`fmt::Debug`] (derived) keeps the full structure for diagnostics.

use std::fmt;

use crate::index::types::{Bits, RawUid};


/// Identifies which field of a UID, or which table coordinate, was out of range.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UidField {
    /// Serial number (level-4 position).
    SerialNumber,

    /// Child slot (level-2 position).
    ChildSlot,

    /// Day within a year (level-3 position).
    Day,

    /// Year (level-1 position).
    Year,

    /// Full timestep passed to the encoder.
    Time,

    /// Storage index supplied with an insert.
    StorageIndex,
}

impl fmt::Display for UidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UidField::SerialNumber => "serial number",
            UidField::ChildSlot => "child slot",
            UidField::Day => "day",
            UidField::Year => "year",
            UidField::Time => "time",
            UidField::StorageIndex => "storage index",
        })
    }
}

/// Names the capacity parameter a [`ConfigError::ZeroCapacity`] refers to.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapacityParameter {
    /// Maximum simultaneous population.
    InitialPopulationSize,

    /// Number of simulated timesteps.
    NumberOfTimesteps,

    /// Maximum number of children per parent.
    MaxChildren,

    /// Ticks per year.
    YearSize,
}

impl fmt::Display for CapacityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CapacityParameter::InitialPopulationSize => "initial_population_size",
            CapacityParameter::NumberOfTimesteps => "number_of_timesteps",
            CapacityParameter::MaxChildren => "max_children",
            CapacityParameter::YearSize => "year_size",
        })
    }
}

/// Returned when capacity parameters cannot be turned into a valid bit layout.
///
/// Raised only at construction; a successfully built index never produces it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {

    /// A capacity parameter was zero.
    ZeroCapacity(CapacityParameter),

    /// The year is wider than the whole time field.
    YearExceedsTime {
        /// Bits required by `year_size`.
        day_bits: Bits,

        /// Bits required by `number_of_timesteps`.
        time_bits: Bits,
    },

    /// Serial number, child slot and time do not fit in 64 bits together.
    WidthOverflow {
        /// Sum of the three field widths.
        total_bits: u32,

        /// Width of a UID.
        limit: Bits,
    },

    /// A single table level would be too wide to allocate.
    TableTooWide {
        /// Which level (as the coordinate that indexes it).
        level: UidField,

        /// Bits required by that level.
        bits: Bits,

        /// Widest allowed level.
        limit: Bits,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity(parameter) => {
                write!(f, "capacity parameter {parameter} must be positive")
            }
            ConfigError::YearExceedsTime { day_bits, time_bits } => write!(
                f,
                "year needs {} bits but the whole time field only has {}",
                day_bits, time_bits
            ),
            ConfigError::WidthOverflow { total_bits, limit } => write!(
                f,
                "uid fields need {} bits (limit {})",
                total_bits, limit
            ),
            ConfigError::TableTooWide { level, bits, limit } => write!(
                f,
                "{} table needs {} bits (limit {})",
                level, bits, limit
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returned when a value does not fit the dimension it addresses.
///
/// ### Fields
/// * `field`: Which coordinate or input field was offending.
/// * `value`: The value that was supplied or decoded.
/// * `max`: The largest valid value (inclusive).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRangeError {

    /// Offending field.
    pub field: UidField,

    /// Supplied or decoded value.
    pub value: u64,

    /// Largest valid value for `field` (inclusive).
    pub max: u64,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} out of range (max {})", self.field, self.value, self.max)
    }
}

impl std::error::Error for OutOfRangeError {}

/// Returned when a UID has no current binding in the index.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundError {

    /// The UID that was looked up.
    pub uid: RawUid,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no binding for uid {:#018x}", self.uid)
    }
}

impl std::error::Error for NotFoundError {}

/// Aggregate error returned by index operations.
///
/// `From<T>` conversions exist for every low-level error type, so internal
/// helpers can return the narrow type and public operations can use `?`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {

    /// Construction-time layout failure.
    Config(ConfigError),

    /// A coordinate or field was outside its dimension.
    OutOfRange(OutOfRangeError),

    /// The UID has no binding.
    NotFound(NotFoundError),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Config(e) => write!(f, "invalid configuration: {e}"),
            IndexError::OutOfRange(e) => write!(f, "{e}"),
            IndexError::NotFound(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Config(e) => Some(e),
            IndexError::OutOfRange(e) => Some(e),
            IndexError::NotFound(e) => Some(e),
        }
    }
}

impl From<ConfigError> for IndexError {
    fn from(e: ConfigError) -> Self { IndexError::Config(e) }
}

impl From<OutOfRangeError> for IndexError {
    fn from(e: OutOfRangeError) -> Self { IndexError::OutOfRange(e) }
}

impl From<NotFoundError> for IndexError {
    fn from(e: NotFoundError) -> Self { IndexError::NotFound(e) }
}

/// Convenience alias used by all public index operations.
pub type IndexResult<T> = Result<T, IndexError>;
