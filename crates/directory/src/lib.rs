//! Column directory for rowlayout
//!
//! This crate maps column codes to byte offsets inside flat row buffers:
//! - ColumnDirectory: perfect-hash offset table with append-only schema evolution
//! - Row lifecycle: create, import and destroy rows by replaying layout groups
//! - VertexHasher / ConstraintGraph: the salted hash and the addend solver
//! - MutableFlags: per-offset "writable through a frozen row" bits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod flags;
pub mod graph;
pub mod groups;
pub mod hasher;
pub mod record;

mod guard;
mod lifecycle;

pub use directory::ColumnDirectory;
pub use flags::MutableFlags;
pub use graph::{ConstraintGraph, ROOT_ADDEND, UNASSIGNED};
pub use groups::LayoutGroup;
pub use hasher::VertexHasher;
pub use record::ColumnRecord;
