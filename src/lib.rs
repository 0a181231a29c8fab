//! # UID Index
//!
//! In-memory identifier index for individuals in a discrete-time population
//! simulation.
//!
//! Every individual carries a 64-bit UID packing its serial number, its
//! birth-order slot among its parent's children, and the tick it was created
//! on. The index maps a UID to a slot in the simulation's own entity storage
//! and can enumerate every live UID.
//!
//! ## Design Goals
//! - O(1) insert, lookup and removal by direct table addressing
//! - Memory proportional to the `(year, child, day)` triples actually
//!   populated, not to the addressable UID space
//! - Explicit errors for bad configuration, out-of-range coordinates and
//!   missing bindings
//! - A year-sharded variant for multi-threaded drivers
//!
//! This crate builds as both:
//! - `rlib` (for Rust usage & integration tests)
//! - `cdylib` (for FFI / DLL usage)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]
#![deny(dead_code)]

pub mod index;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use index::index::UidIndex;
pub use index::shards::ShardedUidIndex;

pub use index::config::IndexConfig;
pub use index::layout::BitLayout;

pub use index::codec::{
    Uid,
    UidParts,
};

pub use index::iter::{
    Bindings,
    Uids,
};

pub use index::table::TableStats;

pub use index::error::{
    IndexResult,
    IndexError,
    ConfigError,
    CapacityParameter,
    OutOfRangeError,
    NotFoundError,
    UidField,
};

pub use index::types::{
    RawUid,
    SerialNumber,
    ChildSlot,
    Tick,
    StorageIndex,
    EMPTY_SLOT,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used index types.
///
/// Import with:
/// ```rust
/// use uid_index::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        UidIndex,
        ShardedUidIndex,
        IndexConfig,
        Uid,
        UidParts,
        IndexError,
        IndexResult,
    };
}
