//! Lazy enumeration of bound UIDs.
//!
//! Traversal order is year, child slot, day, serial number, each ascending.
//! Absent tables at any level are skipped without being allocated, and empty
//! serial-number slots are filtered out, so the iterators have no side
//! effects on the index.
//!
//! The iterators borrow the table immutably. Each call to
//! [`UidIndex::uids`](crate::UidIndex::uids) starts a fresh, independent
//! traversal; mutating the index while one is alive is a borrow error.

use std::iter::FusedIterator;
use std::slice;

use crate::index::codec::Uid;
use crate::index::table::{Binding, ChildTable, DayTable, YearTable};
use crate::index::types::StorageIndex;


/// Occupied bindings of a single year table.
#[derive(Clone)]
pub(crate) struct YearBindings<'a> {
    children: slice::Iter<'a, Option<ChildTable>>,
    days: slice::Iter<'a, Option<DayTable>>,
    slots: slice::Iter<'a, Binding>,
}

impl<'a> YearBindings<'a> {
    pub(crate) fn new(year: &'a YearTable) -> Self {
        Self {
            children: year.children.iter(),
            days: Default::default(),
            slots: Default::default(),
        }
    }
}

impl<'a> Iterator for YearBindings<'a> {
    type Item = Binding;

    fn next(&mut self) -> Option<Binding> {
        loop {
            if let Some(binding) = self.slots.find(|b| !b.is_empty()) {
                return Some(*binding);
            }
            if let Some(day) = self.days.by_ref().flatten().next() {
                self.slots = day.slots.iter();
                continue;
            }
            let child = self.children.by_ref().flatten().next()?;
            self.days = child.days.iter();
        }
    }
}

/// Iterator over `(uid, storage index)` pairs of every occupied slot.
///
/// Returned by [`UidIndex::bindings`](crate::UidIndex::bindings).

#[derive(Clone)]
pub struct Bindings<'a> {
    years: slice::Iter<'a, Option<YearTable>>,
    current: Option<YearBindings<'a>>,
}

impl<'a> Bindings<'a> {
    pub(crate) fn new(years: &'a [Option<YearTable>]) -> Self {
        Self { years: years.iter(), current: None }
    }
}

impl<'a> Iterator for Bindings<'a> {
    type Item = (Uid, StorageIndex);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(binding) = self.current.as_mut().and_then(Iterator::next) {
                return Some((Uid(binding.uid), binding.storage_index));
            }
            let year = self.years.by_ref().flatten().next()?;
            self.current = Some(YearBindings::new(year));
        }
    }
}

impl FusedIterator for Bindings<'_> {}

/// Iterator over every bound UID.
///
/// Returned by [`UidIndex::uids`](crate::UidIndex::uids).

#[derive(Clone)]
pub struct Uids<'a> {
    inner: Bindings<'a>,
}

impl<'a> Uids<'a> {
    pub(crate) fn new(inner: Bindings<'a>) -> Self { Self { inner } }
}

impl<'a> Iterator for Uids<'a> {
    type Item = Uid;

    #[inline]
    fn next(&mut self) -> Option<Uid> {
        self.inner.next().map(|(uid, _)| uid)
    }
}

impl FusedIterator for Uids<'_> {}
