//! # Index Module
//!
//! UID layout, codec and the sparse table behind the index.
//!
//! This module contains:
//! - scalar types and limits (`types`)
//! - error types (`error`)
//! - capacity parameters (`config`) and the derived bit layout (`layout`)
//! - UID packing and unpacking (`codec`)
//! - the lazily-allocated table levels (`table`) and their iterators (`iter`)
//! - the single-threaded index (`index`) and its year-sharded variant (`shards`)
//! - a small thread-local generator for drivers and tests (`random`)
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod config;
pub mod layout;
pub mod codec;
pub mod table;
pub mod iter;
pub mod index;
pub mod shards;
pub mod random;
