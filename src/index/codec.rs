//! Packing and unpacking of UIDs.
//!
//! A UID stores three fields high-to-low: serial number, child slot and
//! time. Time is further split into a coarse `year` and a fine `day`, which
//! together with the other two fields form the four table coordinates.
//!
//! ## Wraparound
//!
//! [`BitLayout::encode`] masks each field to its width before packing. A
//! field wider than its slot therefore loses its high bits instead of
//! corrupting its neighbour. Callers that would rather see an error use
//! [`BitLayout::try_encode`].
//!
//! [`BitLayout::decode`] is pure bit extraction and accepts any word. The
//! serial number is the unmasked upper part of the word, so a UID produced
//! outside the codec can decode to a serial number beyond the table; the
//! index reports that as an out-of-range error rather than indexing past the
//! end of a table.

use std::fmt;

use crate::index::error::{OutOfRangeError, UidField};
use crate::index::layout::BitLayout;
use crate::index::types::{
    shl, shr, ChildSlot, Day, RawUid, SerialNumber, Tick, Year,
};


/// A packed 64-bit individual identifier.
///
/// `Uid` is a plain value; it carries no reference to the index that
/// produced it and is only meaningful together with the [`BitLayout`] it was
/// encoded with.

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Uid(pub RawUid);

impl Uid {
    /// Returns the raw packed word.
    #[inline] pub const fn raw(self) -> RawUid { self.0 }
}

impl From<RawUid> for Uid {
    fn from(raw: RawUid) -> Self { Uid(raw) }
}

impl From<Uid> for RawUid {
    fn from(uid: Uid) -> Self { uid.0 }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four table coordinates of a decoded UID.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UidParts {
    /// Level-4 position.
    pub serial_number: SerialNumber,

    /// Level-2 position.
    pub child_slot: ChildSlot,

    /// Level-3 position.
    pub day: Day,

    /// Level-1 position.
    pub year: Year,
}

impl UidParts {
    /// Recombines `year` and `day` into the timestep they were split from.
    #[inline]
    pub fn time(&self, layout: &BitLayout) -> Tick {
        shl(self.year, layout.day_bits()) | self.day
    }
}

impl BitLayout {
    /// Packs `(serial_number, time, child_slot)` into a UID.
    ///
    /// Each field is masked to its width first; excess high bits are
    /// silently discarded.
    #[inline]
    pub fn encode(&self, serial_number: SerialNumber, time: Tick, child_slot: ChildSlot) -> Uid {
        Uid(
            shl(serial_number & self.serial_mask(), self.serial_offset())
                | shl(child_slot & self.child_mask(), self.child_offset())
                | (time & self.time_mask()),
        )
    }

    /// Packs a UID, rejecting any field that does not fit its width.
    pub fn try_encode(
        &self,
        serial_number: SerialNumber,
        time: Tick,
        child_slot: ChildSlot,
    ) -> Result<Uid, OutOfRangeError> {
        let fields = [
            (UidField::SerialNumber, serial_number, self.serial_mask()),
            (UidField::Time, time, self.time_mask()),
            (UidField::ChildSlot, child_slot, self.child_mask()),
        ];
        for (field, value, max) in fields {
            if value > max {
                return Err(OutOfRangeError { field, value, max });
            }
        }
        Ok(self.encode(serial_number, time, child_slot))
    }

    /// Unpacks a UID into its table coordinates. Never fails.
    #[inline]
    pub fn decode(&self, uid: Uid) -> UidParts {
        let raw = uid.0;
        let time = raw & self.time_mask();
        UidParts {
            serial_number: shr(raw, self.serial_offset()),
            child_slot: shr(raw, self.child_offset()) & self.child_mask(),
            day: time & self.day_mask(),
            year: shr(time, self.day_bits()),
        }
    }

    /// Decodes `uid` and checks every coordinate against the table dimensions.
    pub(crate) fn locate(&self, uid: Uid) -> Result<UidParts, OutOfRangeError> {
        let parts = self.decode(uid);
        let coordinates = [
            (UidField::Year, parts.year, self.year_mask()),
            (UidField::ChildSlot, parts.child_slot, self.child_mask()),
            (UidField::Day, parts.day, self.day_mask()),
            (UidField::SerialNumber, parts.serial_number, self.serial_mask()),
        ];
        for (field, value, max) in coordinates {
            if value > max {
                return Err(OutOfRangeError { field, value, max });
            }
        }
        Ok(parts)
    }
}
