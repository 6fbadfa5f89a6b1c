//! Row Buffer Integration Tests
//!
//! Construction and teardown of rows, rollback of partial construction,
//! import across directory versions, frozen rows.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test rows
//! cargo test --test rows rollback::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod import;

use rowlayout::prelude::*;
use std::sync::Arc;

pub use common::{live, Explodes, NoCopy, Refuses, Tracked};

pub const ID: Column<u64> = Column::new("id");
pub const NAME: Column<String> = Column::new("name");
pub const TRACKED: Column<Tracked> = Column::new("tracked");
pub const TAGS: Column<Vec<String>> = Column::new("tags");

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Directory with `id`, `name` in one batch and `tracked` in a second
pub fn people() -> ColumnDirectory {
    let mut dir = ColumnDirectory::new();
    dir.add_columns([ID.into(), NAME.into()]).unwrap();
    dir.add_column(TRACKED).unwrap();
    dir
}

pub fn shared(dir: ColumnDirectory) -> Arc<ColumnDirectory> {
    Arc::new(dir)
}
