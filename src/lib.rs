//! # rowlayout
//!
//! Flat, dynamically extensible row layouts.
//!
//! A [`ColumnDirectory`] assigns every column of a table a fixed byte offset
//! inside a single row buffer and recovers it from the column's code in
//! constant time, through a minimal perfect hash that is re-solved whenever
//! columns are added. Existing offsets never move, so rows built before a
//! schema change stay valid and can be imported into the new layout.
//!
//! ## Quick Start
//!
//! ```
//! use rowlayout::prelude::*;
//! use std::sync::Arc;
//!
//! const ID: Column<u64> = Column::new("id");
//! const EMAIL: Column<String> = Column::new("email");
//! const VISITS: MutableColumn<u32> = Column::new("visits").mutable();
//!
//! let mut dir = ColumnDirectory::new();
//! dir.add_columns([ID.into(), EMAIL.into(), VISITS.into()])?;
//!
//! let mut row = RowBuffer::new(Arc::new(dir))?;
//! row.set(&ID, 1)?;
//!
//! // Read-only view; only mutable columns can still be written
//! let mut frozen = row.freeze();
//! frozen.set(&VISITS, 3)?;
//! assert!(frozen.set(&ID, 2).is_err());
//! # Ok::<(), rowlayout::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `rowlayout-core`: column codes, value-type witnesses, configuration, errors
//! - `rowlayout-directory`: the directory, its hash and solver, row lifecycle

#![warn(missing_docs)]

mod error;
mod row;

pub mod prelude;

pub use error::{Error, Result};
pub use row::{FrozenRow, RowBuffer};

pub use rowlayout_core::{
    Column, ColumnCode, ColumnDescriptor, ColumnValue, DirectoryConfig, MutableColumn,
    SchemaError, TypedColumn, ValueError, ValueType,
};
pub use rowlayout_directory::{ColumnDirectory, ColumnRecord, LayoutGroup};
