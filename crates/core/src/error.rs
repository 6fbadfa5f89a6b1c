//! Error types for schema registration and value construction
//!
//! - [`SchemaError`]: rejected `add_columns` calls and invalid configuration.
//!   Every variant leaves the directory exactly as it was before the call.
//! - [`ValueError`]: failures reported by a column's value-type collaborator
//!   while a row is being constructed or imported.

use crate::types::ColumnCode;
use thiserror::Error;

/// Errors raised while registering columns or configuring a directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A code already present in the directory (or twice in one batch)
    #[error("duplicate column code {code} ({name})")]
    DuplicateColumnCode {
        /// The offending code
        code: ColumnCode,
        /// Display name of the rejected column
        name: String,
    },

    /// Registering the batch would exceed the directory's fixed capacity
    #[error("too many columns: {requested} requested, capacity is {capacity}")]
    TooManyColumns {
        /// Column count after the rejected batch
        requested: usize,
        /// Maximum column count of the directory
        capacity: usize,
    },

    /// No salt up to the ceiling produced a consistent layout
    #[error("cannot add columns: no consistent layout after {attempts} salts ({columns} columns)")]
    LayoutSearchExhausted {
        /// Number of salts tried
        attempts: usize,
        /// Column count the search tried to place
        columns: usize,
    },

    /// Directory configuration out of range
    #[error("invalid directory config: {0}")]
    InvalidConfig(String),
}

impl SchemaError {
    /// Code of the rejected column, for duplicate errors
    pub fn duplicate_code(&self) -> Option<ColumnCode> {
        match self {
            SchemaError::DuplicateColumnCode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Error reported by a value-type collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Default construction or copy construction failed
    #[error("cannot construct {type_name}: {reason}")]
    Construct {
        /// Name of the value type
        type_name: &'static str,
        /// Collaborator-supplied reason
        reason: String,
    },
}

impl ValueError {
    /// Create a construction error for type `T`
    pub fn construct<T: ?Sized>(reason: impl Into<String>) -> Self {
        ValueError::Construct {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Result type for value construction
pub type ValueResult<T> = std::result::Result<T, ValueError>;
