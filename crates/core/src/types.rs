//! Core identifier types for the row layout engine
//!
//! This module defines:
//! - [`ColumnCode`]: Stable numeric identity of a column within a directory

use serde::{Deserialize, Serialize};

const FNV_BASIS_64: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME_64: u64 = 1_099_511_628_211;

/// Stable numeric identity of a column
///
/// ColumnCode is what the directory hashes to find a column's offset. It is
/// usually derived from the column's name; `Column::with_code` picks one
/// explicitly.
///
/// Two columns registered in the same directory must never share a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnCode(pub u64);

impl ColumnCode {
    /// Create a ColumnCode from a raw value
    pub const fn new(code: u64) -> Self {
        ColumnCode(code)
    }

    /// Derive a ColumnCode from a column name
    ///
    /// Uses 64-bit FNV-1a, folding bytes from the last one to the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowlayout_core::types::ColumnCode;
    ///
    /// let a = ColumnCode::from_name("price");
    /// let b = ColumnCode::from_name("price");
    /// assert_eq!(a, b);
    /// assert_ne!(a, ColumnCode::from_name("quantity"));
    /// ```
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = FNV_BASIS_64;
        let mut i = bytes.len();
        while i > 0 {
            i -= 1;
            hash = (hash ^ bytes[i] as u64).wrapping_mul(FNV_PRIME_64);
        }
        ColumnCode(hash)
    }

    /// Get the underlying u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ColumnCode {
    fn from(code: u64) -> Self {
        ColumnCode(code)
    }
}

impl std::fmt::Display for ColumnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
