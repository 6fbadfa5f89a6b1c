//! Core types for rowlayout
//!
//! This crate defines the vocabulary shared by the directory and its callers:
//! - Column codes and typed column handles
//! - Value-type witnesses (size, alignment, in-place create/copy/drop)
//! - Directory configuration and its constants
//! - Error types for schema registration and value construction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod config;
pub mod error;
pub mod types;
pub mod value;

pub use column::{Column, ColumnDescriptor, MutableColumn, TypedColumn};
pub use config::DirectoryConfig;
pub use error::{SchemaError, SchemaResult, ValueError, ValueResult};
pub use types::ColumnCode;
pub use value::{ColumnValue, ValueType};
