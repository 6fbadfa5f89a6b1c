//! Schema Evolution Tests
//!
//! Offsets of existing columns survive every later batch; cloned directories
//! evolve independently.

use crate::*;

#[test]
fn test_offsets_stable_across_many_batches() {
    common::init_tracing();
    let mut dir = ColumnDirectory::new();
    let mut history = Vec::new();

    for batch in 0..8 {
        let descs: Vec<_> = (0..5).map(|i| numbered("field", batch * 5 + i)).collect();
        dir.add_columns(descs).unwrap();

        let now = offsets(&dir);
        assert_eq!(&now[..history.len()], &history[..]);
        history = now;
    }

    assert_eq!(dir.len(), 40);
    assert_eq!(dir.groups().len(), 8);
    for (index, group) in dir.groups().iter().enumerate() {
        assert_eq!(group.first_column(), index * 5);
        assert_eq!(group.column_count(), 5);
    }
}

#[test]
fn test_new_columns_go_after_old_ones() {
    let mut dir = ColumnDirectory::new();
    dir.add_column(numbered("head", 3)).unwrap();
    let end = dir.total_size();

    dir.add_columns([numbered("tail", 0), numbered("tail", 4)])
        .unwrap();
    let records: Vec<_> = dir.columns().collect();
    assert!(records[1].offset() >= end);
    assert!(records[2].offset() >= records[1].byte_range().end);
    assert_eq!(records[2].offset() % 8, 0);
}

#[test]
fn test_clone_is_independent_snapshot() {
    let mut original = ColumnDirectory::new();
    original
        .add_columns([numbered("base", 0), numbered("base", 1)])
        .unwrap();
    let before = offsets(&original);

    let mut evolved = original.clone();
    evolved.add_column(numbered("added", 2)).unwrap();

    assert_eq!(offsets(&original), before);
    assert_eq!(original.len(), 2);
    assert_eq!(evolved.len(), 3);
    assert_eq!(&offsets(&evolved)[..2], &before[..]);
    assert!(original
        .contains(ColumnCode::from_name("added2"))
        .is_none());
}

#[test]
fn test_zero_sized_columns_take_no_space() {
    const MARKER: Column<()> = Column::new("marker");
    const COUNT: Column<u32> = Column::new("count");

    let mut dir = ColumnDirectory::new();
    dir.add_columns([COUNT.into(), MARKER.into()]).unwrap();
    assert_eq!(dir.offset_of(&MARKER), 4);
    assert_eq!(dir.total_size(), 4);
    assert_eq!(dir.contains(MARKER.code()), Some(4));
}
