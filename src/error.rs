//! Unified error types for rowlayout.
//!
//! Wraps the schema and value errors of the member crates and adds the
//! failures of the typed row API.

use rowlayout_core::{ColumnCode, SchemaError, ValueError};
use thiserror::Error;

/// All rowlayout errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Column registration failed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A value constructor or copier failed
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Write through a frozen row to a column not flagged mutable
    #[error("column {column} is immutable")]
    Immutable {
        /// Column name
        column: String,
    },

    /// Typed access with a type other than the registered one
    #[error("type mismatch on column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Registered value type
        expected: &'static str,
        /// Requested value type
        actual: &'static str,
    },

    /// Access to a column the row's directory does not have
    #[error("unknown column: {column} ({code})")]
    UnknownColumn {
        /// Column name
        column: String,
        /// Column code
        code: ColumnCode,
    },

    /// Row buffer allocation failed or the layout is invalid
    #[error("cannot allocate row of {size} bytes aligned to {align}")]
    Alloc {
        /// Requested size
        size: usize,
        /// Requested alignment
        align: usize,
    },
}

/// Result type for rowlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Nothing in rowlayout is: the layout search is deterministic and a
    /// failed batch fails the same way again.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Check if this error came from column registration.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    /// Check if this error came from a value constructor.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Error::Value(_))
    }

    /// Check if this is a typed-access error.
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            Error::Immutable { .. } | Error::TypeMismatch { .. } | Error::UnknownColumn { .. }
        )
    }

    /// Duplicate code carried by a schema error, if any.
    pub fn duplicate_code(&self) -> Option<ColumnCode> {
        match self {
            Error::Schema(err) => err.duplicate_code(),
            _ => None,
        }
    }
}
