//! The single-threaded UID index.
//!
//! [`UidIndex`] binds UIDs to storage slots for one simulation run. It owns
//! its [`BitLayout`] and a sparse table whose top level (one entry per year)
//! is allocated at construction; everything below is allocated on the first
//! insert that reaches it.
//!
//! ## Semantics
//!
//! * **Insert** overwrites silently: at most one binding exists per
//!   `(year, child slot, day, serial number)`.
//! * **Lookup** never allocates and never returns the empty-slot sentinel.
//! * **Remove** empties a slot but keeps its tables.
//! * Coordinates outside the table dimensions are reported as
//!   [`OutOfRangeError`] before anything is touched.
//!
//! ## Concurrency
//!
//! Mutation takes `&mut self` and enumeration borrows `&self`, so exclusive
//! access is checked by the compiler. Hosts that need to share an index
//! across threads should use [`ShardedUidIndex`](crate::ShardedUidIndex),
//! which locks each year independently, or wrap this type in a lock.

use std::fmt;

use log::{debug, trace};

use crate::index::codec::{Uid, UidParts};
use crate::index::config::IndexConfig;
use crate::index::error::{IndexResult, NotFoundError, OutOfRangeError, UidField};
use crate::index::iter::{Bindings, Uids};
use crate::index::layout::BitLayout;
use crate::index::table::{bind, find, unbind, Binding, TableStats, YearTable};
use crate::index::types::{ChildSlot, SerialNumber, StorageIndex, Tick, EMPTY_SLOT};


/// Maps packed individual UIDs to slots in external entity storage.
///
/// ## Example
/// ```
/// use uid_index::UidIndex;
///
/// let mut index = UidIndex::new(10_000, 365 * 20)?;
/// let uid = index.encode(42, 0, 0);
/// index.insert(uid, 7)?;
/// assert_eq!(index.lookup(uid)?, 7);
/// assert_eq!(index.uids().collect::<Vec<_>>(), vec![uid]);
/// # Ok::<(), uid_index::IndexError>(())
/// ```

pub struct UidIndex {
    /// Field widths and table dimensions.
    layout: BitLayout,

    /// Level-1 table, one optional year per entry.
    years: Box<[Option<YearTable>]>,

    /// Number of occupied serial-number slots.
    live: usize,
}

impl UidIndex {
    /// Creates an index with the default child and year sizes.
    ///
    /// Equivalent to `UidIndex::from_config(IndexConfig::new(..))`.
    pub fn new(initial_population_size: u64, number_of_timesteps: u64) -> IndexResult<Self> {
        Self::from_config(IndexConfig::new(initial_population_size, number_of_timesteps))
    }

    /// Creates an index from explicit capacity parameters.
    ///
    /// ## Errors
    /// [`IndexError::Config`](crate::IndexError::Config) if the parameters do
    /// not produce a valid [`BitLayout`].
    pub fn from_config(config: IndexConfig) -> IndexResult<Self> {
        let layout = BitLayout::from_config(&config)?;
        debug!("uid index layout: {layout}");
        Ok(Self::with_layout(layout))
    }

    /// Creates an empty index for an already validated layout.
    pub fn with_layout(layout: BitLayout) -> Self {
        Self {
            layout,
            years: (0..layout.year_count()).map(|_| None).collect(),
            live: 0,
        }
    }

    pub(crate) fn from_parts(layout: BitLayout, years: Box<[Option<YearTable>]>, live: usize) -> Self {
        Self { layout, years, live }
    }

    /// Returns the layout this index was built with.
    #[inline]
    pub fn layout(&self) -> &BitLayout { &self.layout }

    /// Packs a UID with this index's layout. See [`BitLayout::encode`].
    #[inline]
    pub fn encode(&self, serial_number: SerialNumber, time: Tick, child_slot: ChildSlot) -> Uid {
        self.layout.encode(serial_number, time, child_slot)
    }

    /// Checked packing. See [`BitLayout::try_encode`].
    #[inline]
    pub fn try_encode(
        &self,
        serial_number: SerialNumber,
        time: Tick,
        child_slot: ChildSlot,
    ) -> IndexResult<Uid> {
        Ok(self.layout.try_encode(serial_number, time, child_slot)?)
    }

    /// Unpacks a UID. See [`BitLayout::decode`].
    #[inline]
    pub fn decode(&self, uid: Uid) -> UidParts {
        self.layout.decode(uid)
    }

    /// Binds `uid` to `storage_index`, replacing any previous binding at the
    /// same coordinates.
    ///
    /// Returns the storage index that was replaced, if the slot was occupied.
    ///
    /// ## Errors
    /// * [`OutOfRangeError`] if a decoded coordinate is outside the table, or
    ///   if `storage_index` is the reserved empty-slot sentinel.
    pub fn insert(&mut self, uid: Uid, storage_index: StorageIndex) -> IndexResult<Option<StorageIndex>> {
        check_storage_index(storage_index)?;
        let parts = self.layout.locate(uid)?;

        let binding = Binding { storage_index, uid: uid.raw() };
        let previous = bind(&mut self.years[parts.year as usize], &self.layout, &parts, binding);
        match previous {
            Some(old) => trace!("uid {} overwrote binding of uid {} ({})", uid, old.uid, old.storage_index),
            None => self.live += 1,
        }
        Ok(previous.map(|b| b.storage_index))
    }

    /// Returns the storage index bound to `uid`.
    ///
    /// ## Errors
    /// * [`NotFoundError`] if any level is absent or the slot is empty.
    /// * [`OutOfRangeError`] if a decoded coordinate is outside the table.
    pub fn lookup(&self, uid: Uid) -> IndexResult<StorageIndex> {
        let parts = self.layout.locate(uid)?;
        match find(self.years[parts.year as usize].as_ref(), &parts) {
            Some(binding) if binding.uid == uid.raw() => Ok(binding.storage_index),
            _ => Err(NotFoundError { uid: uid.raw() }.into()),
        }
    }

    /// Returns `true` if `uid` currently has a binding.
    ///
    /// Out-of-range UIDs are simply not contained.
    pub fn contains(&self, uid: Uid) -> bool {
        self.lookup(uid).is_ok()
    }

    /// Removes the binding of `uid` and returns its storage index.
    ///
    /// The slot is reset to empty; no table is freed.
    pub fn remove(&mut self, uid: Uid) -> IndexResult<StorageIndex> {
        let parts = self.layout.locate(uid)?;
        let year = self.years[parts.year as usize].as_mut();
        match unbind(year, &parts) {
            Some(binding) => {
                self.live -= 1;
                Ok(binding.storage_index)
            }
            None => Err(NotFoundError { uid: uid.raw() }.into()),
        }
    }

    /// Number of live bindings.
    #[inline]
    pub fn len(&self) -> usize { self.live }

    /// Returns `true` if nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool { self.live == 0 }

    /// Lazily enumerates every bound UID in year, child, day, serial order.
    pub fn uids(&self) -> Uids<'_> {
        Uids::new(self.bindings())
    }

    /// Lazily enumerates `(uid, storage index)` pairs in the same order as
    /// [`uids`](Self::uids).
    pub fn bindings(&self) -> Bindings<'_> {
        Bindings::new(&self.years)
    }

    /// Counts allocated tables and occupied slots.
    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats::default();
        for year in self.years.iter().flatten() {
            year.accumulate_stats(&mut stats);
        }
        stats
    }
}

impl fmt::Debug for UidIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UidIndex")
            .field("layout", &self.layout)
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for UidIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UidIndex: {}", self.layout)
    }
}

/// Rejects the reserved sentinel as a storage index.
pub(crate) fn check_storage_index(storage_index: StorageIndex) -> Result<(), OutOfRangeError> {
    if storage_index == EMPTY_SLOT {
        return Err(OutOfRangeError {
            field: UidField::StorageIndex,
            value: storage_index,
            max: EMPTY_SLOT - 1,
        });
    }
    Ok(())
}
