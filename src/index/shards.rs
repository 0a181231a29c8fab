//! Year-sharded, thread-safe variant of the index.
//!
//! Year tables are allocated independently of each other, which makes the
//! year the natural unit of locking: [`ShardedUidIndex`] wraps every level-1
//! entry in its own `Mutex`, so inserts and lookups on different years never
//! contend. The live-binding count is kept in an atomic alongside.
//!
//! ## Batch insertion
//!
//! [`ShardedUidIndex::insert_batch`] validates the whole batch up front, groups
//! the bindings by year and hands each group to Rayon. Each worker locks
//! exactly one year for the duration of its group. Within a group the input
//! order is preserved, so a batch that binds the same UID twice ends with the
//! later binding, as a sequence of single inserts would.
//!
//! ## Enumeration
//!
//! There is no borrowing iterator here; [`ShardedUidIndex::uids`] locks one
//! year at a time and returns a snapshot. Bindings made in a year after it
//! has been visited are not reflected.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use rayon::prelude::*;

use crate::index::codec::{Uid, UidParts};
use crate::index::config::IndexConfig;
use crate::index::error::{IndexResult, NotFoundError};
use crate::index::index::{check_storage_index, UidIndex};
use crate::index::iter::YearBindings;
use crate::index::layout::BitLayout;
use crate::index::table::{bind, find, unbind, Binding, TableStats, YearTable};
use crate::index::types::{ChildSlot, SerialNumber, StorageIndex, Tick, Year};


type YearShard = Mutex<Option<YearTable>>;

/// A [`UidIndex`] that can be shared across threads.
///
/// All operations take `&self`. Semantics match [`UidIndex`] operation for
/// operation; only enumeration differs (it returns a snapshot).
///
/// ## Example
/// ```
/// use uid_index::ShardedUidIndex;
///
/// let index = ShardedUidIndex::new(10_000, 7_300)?;
/// let batch: Vec<_> = (0..64).map(|i| (index.encode(i, i * 100, 0), i)).collect();
/// assert_eq!(index.insert_batch(&batch)?, 64);
/// assert_eq!(index.lookup(batch[10].0)?, 10);
/// # Ok::<(), uid_index::IndexError>(())
/// ```

pub struct ShardedUidIndex {
    /// Field widths and table dimensions.
    layout: BitLayout,

    /// One lock per year.
    years: Box<[YearShard]>,

    /// Number of occupied serial-number slots across all years.
    live: AtomicUsize,
}

impl ShardedUidIndex {
    /// Creates an index with the default child and year sizes.
    pub fn new(initial_population_size: u64, number_of_timesteps: u64) -> IndexResult<Self> {
        Self::from_config(IndexConfig::new(initial_population_size, number_of_timesteps))
    }

    /// Creates an index from explicit capacity parameters.
    pub fn from_config(config: IndexConfig) -> IndexResult<Self> {
        let layout = BitLayout::from_config(&config)?;
        debug!("sharded uid index layout: {layout} ({} year shards)", layout.year_count());
        Ok(Self::with_layout(layout))
    }

    /// Creates an empty index for an already validated layout.
    pub fn with_layout(layout: BitLayout) -> Self {
        Self {
            layout,
            years: (0..layout.year_count()).map(|_| Mutex::new(None)).collect(),
            live: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn lock_year(&self, year: Year) -> MutexGuard<'_, Option<YearTable>> {
        // A panic while holding a year leaves its table structurally valid.
        self.years[year as usize].lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the layout this index was built with.
    #[inline]
    pub fn layout(&self) -> &BitLayout { &self.layout }

    /// Packs a UID with this index's layout.
    #[inline]
    pub fn encode(&self, serial_number: SerialNumber, time: Tick, child_slot: ChildSlot) -> Uid {
        self.layout.encode(serial_number, time, child_slot)
    }

    /// Unpacks a UID.
    #[inline]
    pub fn decode(&self, uid: Uid) -> UidParts {
        self.layout.decode(uid)
    }

    /// Binds `uid` to `storage_index`. See [`UidIndex::insert`].
    pub fn insert(&self, uid: Uid, storage_index: StorageIndex) -> IndexResult<Option<StorageIndex>> {
        check_storage_index(storage_index)?;
        let parts = self.layout.locate(uid)?;

        let binding = Binding { storage_index, uid: uid.raw() };
        let previous = bind(&mut self.lock_year(parts.year), &self.layout, &parts, binding);
        if previous.is_none() {
            self.live.fetch_add(1, Ordering::Relaxed);
        }
        Ok(previous.map(|b| b.storage_index))
    }

    /// Binds every `(uid, storage index)` pair, one Rayon task per year.
    ///
    /// Returns the number of bindings that filled a previously empty slot.
    ///
    /// ## Errors
    /// The whole batch is validated before anything is written; if any pair is
    /// out of range the index is left untouched.
    pub fn insert_batch(&self, batch: &[(Uid, StorageIndex)]) -> IndexResult<usize> {
        let mut groups: HashMap<Year, Vec<(UidParts, Binding)>> = HashMap::new();
        for &(uid, storage_index) in batch {
            check_storage_index(storage_index)?;
            let parts = self.layout.locate(uid)?;
            groups
                .entry(parts.year)
                .or_default()
                .push((parts, Binding { storage_index, uid: uid.raw() }));
        }
        debug!("inserting batch of {} bindings across {} years", batch.len(), groups.len());

        let added: usize = groups
            .into_par_iter()
            .map(|(year, entries)| {
                let mut shard = self.lock_year(year);
                entries
                    .iter()
                    .filter(|(parts, binding)| bind(&mut shard, &self.layout, parts, *binding).is_none())
                    .count()
            })
            .sum();

        self.live.fetch_add(added, Ordering::Relaxed);
        Ok(added)
    }

    /// Returns the storage index bound to `uid`. See [`UidIndex::lookup`].
    pub fn lookup(&self, uid: Uid) -> IndexResult<StorageIndex> {
        let parts = self.layout.locate(uid)?;
        let shard = self.lock_year(parts.year);
        match find(shard.as_ref(), &parts) {
            Some(binding) if binding.uid == uid.raw() => Ok(binding.storage_index),
            _ => Err(NotFoundError { uid: uid.raw() }.into()),
        }
    }

    /// Returns `true` if `uid` currently has a binding.
    pub fn contains(&self, uid: Uid) -> bool {
        self.lookup(uid).is_ok()
    }

    /// Removes the binding of `uid`. See [`UidIndex::remove`].
    pub fn remove(&self, uid: Uid) -> IndexResult<StorageIndex> {
        let parts = self.layout.locate(uid)?;
        let mut shard = self.lock_year(parts.year);
        match unbind(shard.as_mut(), &parts) {
            Some(binding) => {
                self.live.fetch_sub(1, Ordering::Relaxed);
                Ok(binding.storage_index)
            }
            None => Err(NotFoundError { uid: uid.raw() }.into()),
        }
    }

    /// Number of live bindings.
    #[inline]
    pub fn len(&self) -> usize { self.live.load(Ordering::Relaxed) }

    /// Returns `true` if nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Snapshot of `(uid, storage index)` pairs in year, child, day, serial order.
    pub fn bindings(&self) -> Vec<(Uid, StorageIndex)> {
        let mut out = Vec::with_capacity(self.len());
        for shard in self.years.iter() {
            let year = shard.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = year.as_ref() {
                out.extend(YearBindings::new(table).map(|b| (Uid(b.uid), b.storage_index)));
            }
        }
        out
    }

    /// Snapshot of every bound UID, in the same order as [`bindings`](Self::bindings).
    pub fn uids(&self) -> Vec<Uid> {
        self.bindings().into_iter().map(|(uid, _)| uid).collect()
    }

    /// Counts allocated tables and occupied slots.
    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats::default();
        for shard in self.years.iter() {
            let year = shard.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = year.as_ref() {
                table.accumulate_stats(&mut stats);
            }
        }
        stats
    }

    /// Converts into a single-threaded [`UidIndex`] without copying any table.
    pub fn into_index(self) -> UidIndex {
        let years = self
            .years
            .into_vec()
            .into_iter()
            .map(|shard| shard.into_inner().unwrap_or_else(PoisonError::into_inner))
            .collect();
        UidIndex::from_parts(self.layout, years, self.live.into_inner())
    }
}
