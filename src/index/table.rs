//! The lazily-allocated sparse table behind the index.
//!
//! # Storage model
//!
//! ```text
//! years:    Box<[Option<YearTable>]>        2^year_bits    (eager)
//! YearTable.children: Box<[Option<ChildTable>]>   2^child_bits   (on first touch)
//! ChildTable.days:    Box<[Option<DayTable>]>     2^day_bits     (on first touch)
//! DayTable.slots:     Box<[Binding]>              2^population_bits (on first touch)
//! ```
//!
//! Each level exclusively owns the next and is addressed directly by the
//! decoded coordinate, so insert and lookup are four bounds-checked slice
//! indexings with no hashing.
//!
//! Tables are never freed once allocated. Emptying a serial-number slot
//! writes the [`EMPTY_SLOT`] sentinel back into it and leaves every table in
//! place, so memory grows only with the number of distinct
//! `(year, child slot, day)` triples ever touched.
//!
//! The helpers [`bind`], [`find`] and [`unbind`] operate on a single year
//! slot. Both [`UidIndex`](crate::UidIndex) (which owns all years directly)
//! and [`ShardedUidIndex`](crate::ShardedUidIndex) (which locks each year
//! separately) are built on them.

use log::trace;

use crate::index::codec::UidParts;
use crate::index::layout::BitLayout;
use crate::index::types::{RawUid, StorageIndex, EMPTY_SLOT};


/// One level-4 slot: the bound storage index and the UID it belongs to.
///
/// A slot whose `storage_index` equals [`EMPTY_SLOT`] is unoccupied and its
/// `uid` is meaningless.

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Slot in the caller's entity storage.
    pub storage_index: StorageIndex,

    /// The UID bound to that slot.
    pub uid: RawUid,
}

impl Binding {
    /// The value every serial-number slot is initialised with.
    pub const EMPTY: Binding = Binding { storage_index: EMPTY_SLOT, uid: 0 };

    /// Returns `true` if no individual occupies this slot.
    #[inline]
    pub fn is_empty(&self) -> bool { self.storage_index == EMPTY_SLOT }

    #[inline]
    fn occupied(self) -> Option<Binding> {
        if self.is_empty() { None } else { Some(self) }
    }
}

/// Level 4: the serial-number array of one `(year, child slot, day)` triple.
#[derive(Debug)]
pub struct DayTable {
    pub(crate) slots: Box<[Binding]>,
}

impl DayTable {
    fn new(layout: &BitLayout) -> Self {
        Self { slots: vec![Binding::EMPTY; layout.serial_count()].into_boxed_slice() }
    }

    /// Returns the occupied binding at `serial_number`, if any.
    #[inline]
    pub fn get(&self, serial_number: usize) -> Option<Binding> {
        self.slots.get(serial_number).and_then(|b| b.occupied())
    }
}

/// Level 3: the day tables of one child slot.
#[derive(Debug)]
pub struct ChildTable {
    pub(crate) days: Box<[Option<DayTable>]>,
}

impl ChildTable {
    fn new(layout: &BitLayout) -> Self {
        Self { days: (0..layout.day_count()).map(|_| None).collect() }
    }
}

/// Level 2: the child-slot tables of one year.
#[derive(Debug)]
pub struct YearTable {
    pub(crate) children: Box<[Option<ChildTable>]>,
}

impl YearTable {
    fn new(layout: &BitLayout) -> Self {
        Self { children: (0..layout.child_count()).map(|_| None).collect() }
    }

    fn day_table(&self, parts: &UidParts) -> Option<&DayTable> {
        self.children[parts.child_slot as usize]
            .as_ref()?
            .days[parts.day as usize]
            .as_ref()
    }

    fn day_table_mut(&mut self, parts: &UidParts) -> Option<&mut DayTable> {
        self.children[parts.child_slot as usize]
            .as_mut()?
            .days[parts.day as usize]
            .as_mut()
    }

    /// Adds this year's allocation counts to `stats`.
    pub fn accumulate_stats(&self, stats: &mut TableStats) {
        stats.year_tables += 1;
        for child in self.children.iter().flatten() {
            stats.child_tables += 1;
            for day in child.days.iter().flatten() {
                stats.day_tables += 1;
                stats.bindings += day.slots.iter().filter(|b| !b.is_empty()).count();
            }
        }
    }
}

/// Allocation counts of a sparse table.
///
/// The lazy-allocation guarantee is visible here: `day_tables` equals the
/// number of distinct `(year, child slot, day)` triples ever written.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Allocated level-2 tables (one per touched year).
    pub year_tables: usize,

    /// Allocated level-3 tables (one per touched `(year, child slot)`).
    pub child_tables: usize,

    /// Allocated level-4 arrays (one per touched `(year, child slot, day)`).
    pub day_tables: usize,

    /// Occupied serial-number slots.
    pub bindings: usize,
}

impl TableStats {
    /// Total number of table entries allocated, including the eager year table.
    pub fn allocated_slots(&self, layout: &BitLayout) -> usize {
        layout.year_count()
            + self.year_tables * layout.child_count()
            + self.child_tables * layout.day_count()
            + self.day_tables * layout.serial_count()
    }
}

/// Writes `binding` at `parts`, allocating missing levels on the way.
///
/// Returns the previously occupied binding at that position, if any.
/// `parts` must already have been range-checked against `layout`.
pub(crate) fn bind(
    year_slot: &mut Option<YearTable>,
    layout: &BitLayout,
    parts: &UidParts,
    binding: Binding,
) -> Option<Binding> {
    let year_table = year_slot.get_or_insert_with(|| {
        trace!("allocating child table for year {}", parts.year);
        YearTable::new(layout)
    });

    let child_table = year_table.children[parts.child_slot as usize].get_or_insert_with(|| {
        trace!("allocating day table for year {} child {}", parts.year, parts.child_slot);
        ChildTable::new(layout)
    });

    let day_table = child_table.days[parts.day as usize].get_or_insert_with(|| {
        trace!(
            "allocating serial table for year {} child {} day {}",
            parts.year, parts.child_slot, parts.day
        );
        DayTable::new(layout)
    });

    let previous = std::mem::replace(&mut day_table.slots[parts.serial_number as usize], binding);
    previous.occupied()
}

/// Returns the occupied binding at `parts` without allocating.
pub(crate) fn find(year_slot: Option<&YearTable>, parts: &UidParts) -> Option<Binding> {
    year_slot?.day_table(parts)?.get(parts.serial_number as usize)
}

/// Empties the slot at `parts`, returning what was bound there.
pub(crate) fn unbind(year_slot: Option<&mut YearTable>, parts: &UidParts) -> Option<Binding> {
    let slot = year_slot?
        .day_table_mut(parts)?
        .slots
        .get_mut(parts.serial_number as usize)?;
    std::mem::replace(slot, Binding::EMPTY).occupied()
}
