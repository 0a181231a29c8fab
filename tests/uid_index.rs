mod common;

use std::collections::HashSet;

use uid_index::{
    IndexConfig, IndexError, NotFoundError, OutOfRangeError, TableStats, Uid, UidField, UidIndex,
    EMPTY_SLOT,
};

#[test]
fn founders_at_time_zero_are_indexed() {
    let mut index = common::reference_index();

    for i in 0..32 {
        let uid = index.encode(i, 0, 0);
        assert_eq!(index.insert(uid, i).unwrap(), None);
    }

    for i in 0..32 {
        assert_eq!(index.lookup(index.encode(i, 0, 0)).unwrap(), i);
    }

    let uids: Vec<Uid> = index.uids().collect();
    let distinct: HashSet<Uid> = uids.iter().copied().collect();
    assert_eq!(uids.len(), 32);
    assert_eq!(distinct.len(), 32);
    assert_eq!(index.len(), 32);
}

#[test]
fn second_insert_overwrites_first() {
    let mut index = common::reference_index();
    let uid = index.encode(7, 1_000, 3);

    assert_eq!(index.insert(uid, 10).unwrap(), None);
    assert_eq!(index.insert(uid, 20).unwrap(), Some(10));

    assert_eq!(index.lookup(uid).unwrap(), 20);
    assert_eq!(index.uids().collect::<Vec<_>>(), vec![uid]);
    assert_eq!(index.len(), 1);
}

#[test]
fn lookup_of_unbound_uid_is_not_found() {
    let mut index = common::reference_index();
    let missing = index.encode(1, 2, 3);

    // Nothing allocated at all.
    assert_eq!(
        index.lookup(missing),
        Err(IndexError::NotFound(NotFoundError { uid: missing.raw() }))
    );

    // Same day table allocated, different serial number.
    index.insert(index.encode(2, 2, 3), 0).unwrap();
    assert!(matches!(index.lookup(missing), Err(IndexError::NotFound(_))));
    assert!(!index.contains(missing));

    // Same year, different child slot.
    index.insert(index.encode(1, 2, 4), 0).unwrap();
    assert!(matches!(index.lookup(missing), Err(IndexError::NotFound(_))));
}

#[test]
fn lookup_does_not_allocate() {
    let index = common::reference_index();
    for t in 0..1_000 {
        let _ = index.lookup(index.encode(t, t, t % 8));
    }
    assert_eq!(index.stats(), TableStats::default());
}

#[test]
fn tables_grow_only_with_touched_days() {
    let mut index = common::reference_index();
    let layout = *index.layout();

    for i in 0..32 {
        index.insert(index.encode(i, 0, 0), i).unwrap();
    }
    let stats = index.stats();
    assert_eq!(
        stats,
        TableStats { year_tables: 1, child_tables: 1, day_tables: 1, bindings: 32 }
    );
    assert_eq!(stats.allocated_slots(&layout), 32 + 8 + 256 + 16_384);

    // Another day in the same year and child slot.
    index.insert(index.encode(0, 1, 0), 100).unwrap();
    // A new year altogether.
    index.insert(index.encode(0, 256, 0), 101).unwrap();
    // Overwrite touches nothing new.
    index.insert(index.encode(3, 0, 0), 102).unwrap();

    assert_eq!(
        index.stats(),
        TableStats { year_tables: 2, child_tables: 2, day_tables: 3, bindings: 34 }
    );
}

#[test]
fn garbage_uid_is_out_of_range() {
    let mut index = common::reference_index();
    let garbage = Uid(u64::MAX);
    let expected = OutOfRangeError {
        field: UidField::SerialNumber,
        value: u64::MAX >> 16,
        max: (1 << 14) - 1,
    };

    assert_eq!(index.insert(garbage, 0), Err(IndexError::OutOfRange(expected)));
    assert_eq!(index.lookup(garbage), Err(IndexError::OutOfRange(expected)));
    assert_eq!(index.remove(garbage), Err(IndexError::OutOfRange(expected)));
    assert_eq!(index.stats(), TableStats::default());
}

#[test]
fn sentinel_storage_index_is_rejected() {
    let mut index = common::reference_index();
    let uid = index.encode(1, 1, 1);

    let err = index.insert(uid, EMPTY_SLOT).unwrap_err();
    assert!(matches!(
        err,
        IndexError::OutOfRange(OutOfRangeError { field: UidField::StorageIndex, .. })
    ));
    assert!(index.is_empty());
    assert_eq!(index.stats().year_tables, 0);
}

#[test]
fn remove_empties_slot_but_keeps_tables() {
    let mut index = common::reference_index();
    let a = index.encode(1, 500, 2);
    let b = index.encode(2, 500, 2);
    index.insert(a, 11).unwrap();
    index.insert(b, 12).unwrap();

    assert_eq!(index.remove(a).unwrap(), 11);
    assert_eq!(index.len(), 1);
    assert!(matches!(index.lookup(a), Err(IndexError::NotFound(_))));
    assert!(matches!(index.remove(a), Err(IndexError::NotFound(_))));
    assert_eq!(index.uids().collect::<Vec<_>>(), vec![b]);

    let stats = index.stats();
    assert_eq!(stats.day_tables, 1);
    assert_eq!(stats.bindings, 1);

    // Rebinding after removal counts as a fresh binding.
    assert_eq!(index.insert(a, 13).unwrap(), None);
    assert_eq!(index.len(), 2);
}

#[test]
fn enumeration_orders_by_year_child_day_serial() {
    let mut index = common::reference_index();
    let inputs = [
        (5, 3 * 256 + 4, 0),
        (9, 10, 5),
        (2, 10, 0),
        (1, 10, 0),
        (6, 2, 0),
        (0, 7_000, 7),
    ];
    for (storage, &(serial, time, child)) in inputs.iter().enumerate() {
        index.insert(index.encode(serial, time, child), storage as u64).unwrap();
    }

    let mut expected: Vec<Uid> = inputs.iter().map(|&(s, t, c)| index.encode(s, t, c)).collect();
    expected.sort_by_key(|&uid| {
        let p = index.decode(uid);
        (p.year, p.child_slot, p.day, p.serial_number)
    });

    assert_eq!(index.uids().collect::<Vec<_>>(), expected);

    // Restartable: a second traversal is identical and independent.
    let mut first = index.uids();
    let head = first.next();
    assert_eq!(index.uids().collect::<Vec<_>>(), expected);
    assert_eq!(head, expected.first().copied());
    assert_eq!(first.count(), expected.len() - 1);
}

#[test]
fn bindings_pair_uids_with_storage_indices() {
    let mut index = common::reference_index();
    for i in 0..100 {
        index.insert(index.encode(i, i * 7, i % 8), 1_000 + i).unwrap();
    }

    let mut seen = 0;
    for (uid, storage) in index.bindings() {
        assert_eq!(index.lookup(uid).unwrap(), storage);
        assert_eq!(storage, 1_000 + index.decode(uid).serial_number);
        seen += 1;
    }
    assert_eq!(seen, 100);
}

#[test]
fn empty_index_enumerates_nothing() {
    let index = common::reference_index();
    assert!(index.is_empty());
    assert_eq!(index.uids().next(), None);
    assert_eq!(index.bindings().count(), 0);
}

#[test]
fn custom_year_size_changes_day_split() {
    let mut index = UidIndex::from_config(IndexConfig::new(100, 1_000).with_year_size(10)).unwrap();
    assert_eq!(index.layout().day_bits(), 4);
    assert_eq!(index.layout().year_bits(), 6);

    let uid = index.encode(3, 999, 0);
    let parts = index.decode(uid);
    assert_eq!((parts.year, parts.day), (999 >> 4, 999 & 0xF));

    index.insert(uid, 4).unwrap();
    assert_eq!(index.lookup(uid).unwrap(), 4);
}
