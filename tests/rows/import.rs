//! Import Tests
//!
//! Rows built by an older directory snapshot imported into a newer one.

use crate::*;

#[test]
fn test_import_into_evolved_snapshot() {
    let old = people();
    let mut new = old.clone();
    new.add_column(TAGS).unwrap();
    let (old, new) = (shared(old), shared(new));

    let mut source = RowBuffer::new(Arc::clone(&old)).unwrap();
    source.set(&ID, 12).unwrap();
    source.set(&NAME, "lovelace".to_string()).unwrap();
    source.get_mut(&TRACKED).unwrap().value = 3;

    let copies = common::copies();
    let row = RowBuffer::import(Arc::clone(&new), &source).unwrap();
    assert_eq!(common::copies(), copies + 1);
    assert_eq!(*row.get(&ID).unwrap(), 12);
    assert_eq!(row.get(&NAME).unwrap(), "lovelace");
    assert_eq!(row.get(&TRACKED).unwrap().value, 3);
    assert!(row.get(&TAGS).unwrap().is_empty());

    // Source keeps its own values
    assert_eq!(source.get(&NAME).unwrap(), "lovelace");
    assert!(source.get(&TAGS).is_err());
}

#[test]
fn test_import_between_unrelated_directories() {
    let mut left = ColumnDirectory::new();
    left.add_columns([NAME.into(), ID.into()]).unwrap();
    let mut right = ColumnDirectory::new();
    right.add_columns([TAGS.into(), ID.into()]).unwrap();

    let mut source = RowBuffer::new(shared(left)).unwrap();
    source.set(&ID, 8).unwrap();
    source.set(&NAME, "x".to_string()).unwrap();

    let row = RowBuffer::import(shared(right), &source).unwrap();
    assert_eq!(*row.get(&ID).unwrap(), 8);
    assert!(row.get(&TAGS).unwrap().is_empty());
    assert!(matches!(row.get(&NAME), Err(Error::UnknownColumn { .. })));
}

#[test]
fn test_import_defaults_column_of_other_type() {
    let mut left = ColumnDirectory::new();
    left.add_column(Column::<u32>::new("score")).unwrap();
    let mut right = ColumnDirectory::new();
    right.add_column(Column::<String>::new("score")).unwrap();

    let mut source = RowBuffer::new(shared(left)).unwrap();
    source.set(&Column::<u32>::new("score"), 99).unwrap();

    let row = RowBuffer::import(shared(right), &source).unwrap();
    assert_eq!(row.get(&Column::<String>::new("score")).unwrap(), "");
}

#[test]
fn test_evolve_row_in_place() {
    let dir = shared(people());
    let mut row = RowBuffer::new(Arc::clone(&dir)).unwrap();
    let mut sibling = RowBuffer::new(Arc::clone(&dir)).unwrap();
    row.set(&NAME, "turing".to_string()).unwrap();
    sibling.set(&ID, 2).unwrap();

    let before = live();
    row.evolve([TAGS.into()]).unwrap();
    assert_eq!(live(), before);
    assert_eq!(row.get(&NAME).unwrap(), "turing");
    row.get_mut(&TAGS).unwrap().push("pioneer".to_string());

    // The shared directory and its other rows are untouched
    assert!(dir.column(TAGS.code()).is_none());
    assert_eq!(sibling.directory().len(), 3);
    assert_eq!(*sibling.get(&ID).unwrap(), 2);
}

#[test]
fn test_try_clone_copies_values() {
    let mut row = RowBuffer::new(shared(people())).unwrap();
    row.set(&NAME, "a".to_string()).unwrap();
    let before = live();

    let mut copy = row.try_clone().unwrap();
    assert_eq!(live(), before + 1);
    copy.get_mut(&NAME).unwrap().push('b');
    assert_eq!(row.get(&NAME).unwrap(), "a");
    assert_eq!(copy.get(&NAME).unwrap(), "ab");
}
