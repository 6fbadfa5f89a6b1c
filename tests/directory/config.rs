//! Configuration Tests

use crate::*;
use rowlayout::SchemaError;

#[test]
fn test_config_from_json() {
    let config: DirectoryConfig =
        serde_json::from_str(r#"{ "log_vertex_count": 6 }"#).unwrap();
    let dir = ColumnDirectory::with_config(config).unwrap();
    assert_eq!(dir.capacity(), 32);
    assert!(!dir.config().reserve_row_number);
}

#[test]
fn test_out_of_range_config_rejected() {
    let config: DirectoryConfig =
        serde_json::from_str(r#"{ "log_vertex_count": 20 }"#).unwrap();
    let err = ColumnDirectory::with_config(config).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidConfig(_)));
    assert!(DirectoryConfig::new(3).is_err());
}

#[test]
fn test_row_number_reserves_prefix() {
    const FLAG: Column<u8> = Column::new("flag");
    const COUNT: Column<u64> = Column::new("count");

    let config = DirectoryConfig::default().with_row_number(true);
    let mut dir = ColumnDirectory::with_config(config).unwrap();
    assert_eq!(dir.total_size(), std::mem::size_of::<usize>());

    dir.add_columns([FLAG.into(), COUNT.into()]).unwrap();
    assert_eq!(dir.offset_of(&FLAG), std::mem::size_of::<usize>());
    assert_eq!(dir.offset_of(&COUNT) % 8, 0);
    assert!(dir.offset_of(&COUNT) > dir.offset_of(&FLAG));
}

#[test]
fn test_largest_table() {
    let config = DirectoryConfig::new(15).unwrap();
    let mut dir = ColumnDirectory::with_config(config).unwrap();
    assert_eq!(dir.capacity(), 1 << 14);

    let batch: Vec<_> = (0..64).map(|i| numbered("wide", i)).collect();
    dir.add_columns(batch).unwrap();
    for record in dir.columns() {
        assert_eq!(dir.offset(record.code()), record.offset());
    }
}
