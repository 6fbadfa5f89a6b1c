//! Convenient imports for rowlayout.
//!
//! ```
//! use rowlayout::prelude::*;
//!
//! const ID: Column<u64> = Column::new("id");
//! let mut dir = ColumnDirectory::new();
//! dir.add_column(ID)?;
//! # Ok::<(), rowlayout::Error>(())
//! ```

// Directory and rows
pub use crate::row::{FrozenRow, RowBuffer};
pub use rowlayout_directory::ColumnDirectory;

// Error handling
pub use crate::error::{Error, Result};

// Columns
pub use rowlayout_core::{
    Column, ColumnCode, ColumnDescriptor, ColumnValue, DirectoryConfig, MutableColumn,
    TypedColumn,
};
