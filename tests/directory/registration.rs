//! Registration Tests
//!
//! Batch registration, duplicate and capacity rejection, membership checks.

use crate::*;
use rowlayout::SchemaError;

const USER_ID: Column<i32> = Column::new("user_id");
const BALANCE: Column<f64> = Column::new("balance");
const AGE: Column<i32> = Column::new("age");

// =============================================================================
// EVOLUTION SCENARIO
// =============================================================================

#[test]
fn test_two_then_one_then_duplicate_then_overflow() {
    common::init_tracing();
    let mut dir = small_directory();
    assert_eq!(dir.capacity(), 8);

    dir.add_columns([USER_ID.into(), BALANCE.into()]).unwrap();
    assert!(dir.total_size() >= 12);
    let user_id = dir.offset_of(&USER_ID);
    let balance = dir.offset_of(&BALANCE);
    assert_ne!(user_id, balance);

    dir.add_column(AGE).unwrap();
    assert_eq!(dir.offset_of(&USER_ID), user_id);
    assert_eq!(dir.offset_of(&BALANCE), balance);
    let age = dir.offset_of(&AGE);
    assert!(age >= balance + 8);

    let err = dir.add_column(USER_ID).unwrap_err();
    assert_eq!(err.duplicate_code(), Some(USER_ID.code()));
    assert_eq!(dir.len(), 3);

    let more: Vec<_> = (0..6).map(|i| numbered("extra", i)).collect();
    let err = dir.add_columns(more).unwrap_err();
    assert_eq!(
        err,
        SchemaError::TooManyColumns {
            requested: 9,
            capacity: 8,
        }
    );

    assert_eq!(dir.offset_of(&USER_ID), user_id);
    assert_eq!(dir.offset_of(&BALANCE), balance);
    assert_eq!(dir.offset_of(&AGE), age);
    assert_eq!(dir.len(), 3);
}

#[test]
fn test_layout_follows_registration_order() {
    let mut dir = small_directory();
    dir.add_columns([USER_ID.into(), BALANCE.into()]).unwrap();
    dir.add_column(AGE).unwrap();

    assert_eq!(dir.offset_of(&USER_ID), 0);
    assert_eq!(dir.offset_of(&BALANCE), 8);
    assert_eq!(dir.offset_of(&AGE), 16);
    assert_eq!(dir.total_size(), 20);
    assert_eq!(dir.alignment(), 8);
    assert_eq!(dir.groups().len(), 2);
}

// =============================================================================
// REJECTED BATCHES
// =============================================================================

#[test]
fn test_duplicate_inside_batch_rejected() {
    let mut dir = ColumnDirectory::new();
    let err = dir
        .add_columns([USER_ID.into(), BALANCE.into(), USER_ID.into()])
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateColumnCode { ref name, .. } if name == "user_id"));
    assert!(dir.is_empty());
    assert_eq!(dir.contains(BALANCE.code()), None);
}

#[test]
fn test_rejected_batch_leaves_no_trace() {
    let mut dir = ColumnDirectory::new();
    dir.add_column(USER_ID).unwrap();
    let before = offsets(&dir);
    let (size, salt) = (dir.total_size(), dir.salt());

    let err = dir.add_columns([BALANCE.into(), AGE.into(), USER_ID.into()]);
    assert!(err.is_err());
    assert_eq!(offsets(&dir), before);
    assert_eq!(dir.total_size(), size);
    assert_eq!(dir.salt(), salt);
    assert_eq!(dir.groups().len(), 1);
    assert_eq!(dir.contains(BALANCE.code()), None);
    assert_eq!(dir.contains(AGE.code()), None);
}

#[test]
fn test_empty_batch_is_noop() {
    let mut dir = ColumnDirectory::new();
    dir.add_columns(Vec::<ColumnDescriptor>::new()).unwrap();
    assert!(dir.is_empty());
    assert!(dir.groups().is_empty());
    assert_eq!(dir.total_size(), 0);
}

#[test]
fn test_full_directory_rejects_one_more() {
    let mut dir = small_directory();
    for i in 0..8 {
        dir.add_column(numbered("slot", i)).unwrap();
    }
    let err = dir.add_column(numbered("slot", 8)).unwrap_err();
    assert!(matches!(err, SchemaError::TooManyColumns { requested: 9, capacity: 8 }));
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

#[test]
fn test_contains_only_registered_codes() {
    let mut dir = ColumnDirectory::new();
    let batch: Vec<_> = (0..40).map(|i| numbered("field", i)).collect();
    dir.add_columns(batch).unwrap();

    for record in dir.columns() {
        assert_eq!(dir.contains(record.code()), Some(record.offset()));
    }
    for i in 0..2000 {
        let probe = ColumnCode::from_name(&format!("probe{i}"));
        assert_eq!(dir.contains(probe), None);
    }
}

#[test]
fn test_records_describe_columns() {
    let mut dir = ColumnDirectory::new();
    dir.add_columns([USER_ID.into(), BALANCE.mutable().into()])
        .unwrap();

    let record = dir.column(BALANCE.code()).unwrap();
    assert_eq!(record.name(), "balance");
    assert!(record.value_type().is::<f64>());
    assert!(record.descriptor().is_mutable());
    assert_eq!(record.byte_range(), record.offset()..record.offset() + 8);
    assert!(dir.is_mutable(record.offset()));
    assert!(!dir.is_mutable(dir.offset_of(&USER_ID)));
}

#[test]
fn test_set_mutable_after_registration() {
    let mut dir = ColumnDirectory::new();
    dir.add_columns([USER_ID.into(), AGE.into()]).unwrap();
    let age = dir.offset_of(&AGE);
    assert!(!dir.is_mutable(age));
    dir.set_mutable(age);
    assert!(dir.is_mutable(age));
    assert!(!dir.is_mutable(dir.offset_of(&USER_ID)));
}
