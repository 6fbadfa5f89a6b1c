//! Registered column records

use rowlayout_core::{ColumnCode, ColumnDescriptor, ValueType};

/// A registered column and the offset it was assigned
///
/// Created once, when the `add_columns` call that registered the column
/// commits; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRecord {
    descriptor: ColumnDescriptor,
    offset: usize,
}

impl ColumnRecord {
    pub(crate) fn new(descriptor: ColumnDescriptor, offset: usize) -> Self {
        ColumnRecord { descriptor, offset }
    }

    /// Byte offset of the column inside a row
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Stable code of the column
    #[inline]
    pub fn code(&self) -> ColumnCode {
        self.descriptor.code()
    }

    /// Display name of the column
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Value-type witness of the column
    #[inline]
    pub fn value_type(&self) -> &ValueType {
        self.descriptor.value_type()
    }

    /// The descriptor the column was registered with
    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// Byte range `[offset, offset + size)` the column occupies
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.value_type().size()
    }
}
