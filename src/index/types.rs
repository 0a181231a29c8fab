//! Core scalar types, bit widths and the empty-slot sentinel.
//!
//! Every UID in the index is a single packed 64-bit word with the layout
//!
//! ```text
//! | serial number | child slot | year | day |
//!                              \---- time ----/
//! ```
//!
//! The widths of the fields are not compile-time constants: they are derived
//! at construction from the simulation's capacity parameters (see
//! [`BitLayout`](crate::index::layout::BitLayout)). This module only fixes
//! the types those fields are carried in and the hard limits every layout
//! must respect.
//!
//! All coordinate types are plain `u64` aliases. They exist to make
//! signatures self-describing, not to add type safety; the packed identifier
//! itself is wrapped in [`Uid`](crate::index::codec::Uid).

/// Bit-width type used for layout calculations.
pub type Bits = u8;

/// Raw packed identifier word.
pub type RawUid = u64;
/// Lineage slot of an individual.
pub type SerialNumber = u64;
/// Birth-order slot among a parent's children.
pub type ChildSlot = u64;
/// Discrete simulation timestep.
pub type Tick = u64;
/// Fine time coordinate, the position of a tick within its year.
pub type Day = u64;
/// Coarse time coordinate, `tick >> day_bits`.
pub type Year = u64;
/// Opaque slot in the caller's entity storage.
pub type StorageIndex = u64;

/// Total number of bits in a [`RawUid`].
pub const UID_BITS: Bits = 64;

/// Widest single table level the index will allocate.
///
/// Every level is one contiguous boxed slice of `2^bits` entries, so a level
/// wider than this cannot be materialised.
pub const MAX_TABLE_BITS: Bits = 32;

/// Storage index marking an unoccupied serial-number slot.
///
/// Never returned by lookups and never accepted by inserts.
pub const EMPTY_SLOT: StorageIndex = StorageIndex::MAX;

/// Default upper bound on children per parent.
pub const DEFAULT_MAX_CHILDREN: u64 = 8;
/// Default number of ticks per year.
pub const DEFAULT_YEAR_SIZE: u64 = 256;

const _: [(); 1] = [(); (MAX_TABLE_BITS < UID_BITS) as usize];

/// Returns a mask selecting the low `bits` bits of a word.
///
/// Saturates at a full mask for `bits >= 64`.
#[inline]
pub const fn mask(bits: Bits) -> u64 {
    if bits == 0 {
        0
    } else if bits >= UID_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Left shift that yields zero instead of overflowing when `by >= 64`.
#[inline]
pub(crate) const fn shl(value: u64, by: Bits) -> u64 {
    if by >= UID_BITS { 0 } else { value << by }
}

/// Right shift that yields zero instead of overflowing when `by >= 64`.
#[inline]
pub(crate) const fn shr(value: u64, by: Bits) -> u64 {
    if by >= UID_BITS { 0 } else { value >> by }
}
