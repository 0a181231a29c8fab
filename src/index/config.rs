//! Capacity parameters supplied once when an index is constructed.
//!
//! The four parameters are expressed in the simulation's own units
//! (individuals, ticks, children, ticks per year). [`BitLayout`] turns them
//! into field widths by rounding each one up to the next power of two.
//!
//! With the `serde` feature the configuration can be loaded from the same
//! settings file as the rest of a simulation run.
//!
//! [`BitLayout`]: crate::index::layout::BitLayout

use crate::index::types::{DEFAULT_MAX_CHILDREN, DEFAULT_YEAR_SIZE};


/// Capacity parameters for a [`UidIndex`](crate::UidIndex).
///
/// ## Example
/// ```
/// use uid_index::IndexConfig;
///
/// let config = IndexConfig::new(10_000, 365 * 20).with_max_children(4);
/// assert_eq!(config.max_children, 4);
/// assert_eq!(config.year_size, 256);
/// ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {

    /// Maximum simultaneous population, bounds the serial number.
    pub initial_population_size: u64,

    /// Number of simulated ticks, bounds the time field.
    pub number_of_timesteps: u64,

    /// Maximum children per parent, bounds the child slot.
    #[cfg_attr(feature = "serde", serde(default = "default_max_children"))]
    pub max_children: u64,

    /// Ticks per year, bounds the day coordinate.
    #[cfg_attr(feature = "serde", serde(default = "default_year_size"))]
    pub year_size: u64,
}

#[cfg(feature = "serde")]
fn default_max_children() -> u64 { DEFAULT_MAX_CHILDREN }

#[cfg(feature = "serde")]
fn default_year_size() -> u64 { DEFAULT_YEAR_SIZE }

impl IndexConfig {
    /// Creates a configuration with the default child and year sizes.
    pub fn new(initial_population_size: u64, number_of_timesteps: u64) -> Self {
        Self {
            initial_population_size,
            number_of_timesteps,
            max_children: DEFAULT_MAX_CHILDREN,
            year_size: DEFAULT_YEAR_SIZE,
        }
    }

    /// Overrides the maximum number of children per parent.
    pub fn with_max_children(mut self, max_children: u64) -> Self {
        self.max_children = max_children;
        self
    }

    /// Overrides the number of ticks per year.
    pub fn with_year_size(mut self, year_size: u64) -> Self {
        self.year_size = year_size;
        self
    }
}
