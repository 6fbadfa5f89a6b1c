//! Owned row buffers.
//!
//! [`RowBuffer`] allocates `total_size()` bytes at `alignment()` for a
//! directory, constructs every column in place and tears them down on drop.
//! Typed access checks membership and the registered value type, so the
//! unsafe directory primitives never see a wrong offset or type.

use crate::error::{Error, Result};
use rowlayout_core::{ColumnDescriptor, TypedColumn};
use rowlayout_directory::ColumnDirectory;
use std::alloc::{alloc, dealloc, Layout};
use std::ptr::NonNull;
use std::sync::Arc;
use tracing::trace;

/// A row laid out by a [`ColumnDirectory`]
///
/// # Example
///
/// ```
/// use rowlayout::prelude::*;
/// use std::sync::Arc;
///
/// const ID: Column<u64> = Column::new("id");
/// const NAME: Column<String> = Column::new("name");
///
/// let mut dir = ColumnDirectory::new();
/// dir.add_columns([ID.into(), NAME.into()])?;
///
/// let mut row = RowBuffer::new(Arc::new(dir))?;
/// row.set(&ID, 7)?;
/// row.get_mut(&NAME)?.push_str("ada");
/// assert_eq!(*row.get(&ID)?, 7);
/// # Ok::<(), rowlayout::Error>(())
/// ```
pub struct RowBuffer {
    directory: Arc<ColumnDirectory>,
    ptr: NonNull<u8>,
    // Frees the buffer after `Drop for RowBuffer` dropped the values
    raw: RawRow,
}

// SAFETY: the buffer is uniquely owned and every column value is
// `Send + Sync` (required by `ColumnValue`).
unsafe impl Send for RowBuffer {}
unsafe impl Sync for RowBuffer {}

impl RowBuffer {
    /// Allocate a row and default-construct every column
    pub fn new(directory: Arc<ColumnDirectory>) -> Result<Self> {
        let raw = RawRow::for_directory(&directory)?;
        let ptr = raw.ptr;
        unsafe { directory.create_row(ptr)? };
        Ok(RowBuffer {
            directory,
            ptr,
            raw,
        })
    }

    /// Allocate a row for `directory` and fill it from `source`
    ///
    /// Columns `source`'s directory also has (same code, same type) are
    /// copied; the others are default-constructed. The row number, if both
    /// directories reserve one, is carried over.
    pub fn import(directory: Arc<ColumnDirectory>, source: &RowBuffer) -> Result<Self> {
        let raw = RawRow::for_directory(&directory)?;
        let ptr = raw.ptr;
        unsafe { directory.import_row(ptr, &source.directory, source.ptr)? };
        let mut row = RowBuffer {
            directory,
            ptr,
            raw,
        };
        if let Some(number) = source.row_number() {
            row.set_row_number(number);
        }
        Ok(row)
    }

    /// Copy of the row with its own buffer
    pub fn try_clone(&self) -> Result<Self> {
        Self::import(Arc::clone(&self.directory), self)
    }

    /// Register `batch` on a private copy of the directory and move the row
    /// onto it
    ///
    /// Directories shared with other rows are cloned first, so those rows
    /// keep their layout. Every existing value is carried over; the new
    /// columns are default-constructed. On error the row is unchanged.
    pub fn evolve<I>(&mut self, batch: I) -> Result<()>
    where
        I: IntoIterator<Item = ColumnDescriptor>,
    {
        let mut directory = Arc::clone(&self.directory);
        Arc::make_mut(&mut directory).add_columns(batch)?;
        trace!(
            total_size = directory.total_size(),
            "moving row onto evolved directory"
        );
        *self = RowBuffer::import(directory, self)?;
        Ok(())
    }

    /// Directory the row is laid out by
    pub fn directory(&self) -> &Arc<ColumnDirectory> {
        &self.directory
    }

    /// Address of the row buffer
    pub fn as_ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Typed reference to a column value
    pub fn get<C: TypedColumn>(&self, column: &C) -> Result<&C::Value> {
        let offset = self.checked_offset(column)?;
        Ok(unsafe { ColumnDirectory::get(self.ptr, offset) })
    }

    /// Mutable typed reference to a column value
    pub fn get_mut<C: TypedColumn>(&mut self, column: &C) -> Result<&mut C::Value> {
        let offset = self.checked_offset(column)?;
        Ok(unsafe { ColumnDirectory::get_mut(self.ptr, offset) })
    }

    /// Replace a column value
    pub fn set<C: TypedColumn>(&mut self, column: &C, value: C::Value) -> Result<()> {
        *self.get_mut(column)? = value;
        Ok(())
    }

    /// Row number, if the directory reserves one
    pub fn row_number(&self) -> Option<usize> {
        if !self.directory.config().reserve_row_number {
            return None;
        }
        Some(unsafe { self.directory.row_number(self.ptr) })
    }

    /// Store the row number; returns `false` if the directory reserves none
    pub fn set_row_number(&mut self, number: usize) -> bool {
        if !self.directory.config().reserve_row_number {
            return false;
        }
        unsafe { self.directory.set_row_number(self.ptr, number) };
        true
    }

    /// Turn the row into a read-only view
    pub fn freeze(self) -> FrozenRow {
        FrozenRow { row: self }
    }

    fn checked_offset<C: TypedColumn>(&self, column: &C) -> Result<usize> {
        let code = column.code();
        let record = self
            .directory
            .column(code)
            .ok_or_else(|| Error::UnknownColumn {
                column: column.name().to_string(),
                code,
            })?;
        if !record.value_type().is::<C::Value>() {
            return Err(Error::TypeMismatch {
                column: record.name().to_string(),
                expected: record.value_type().type_name(),
                actual: std::any::type_name::<C::Value>(),
            });
        }
        Ok(record.offset())
    }
}

impl Drop for RowBuffer {
    fn drop(&mut self) {
        unsafe { self.directory.destroy_row(self.ptr) };
    }
}

impl std::fmt::Debug for RowBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBuffer")
            .field("columns", &self.directory.len())
            .field("size", &self.raw.layout.size())
            .field("align", &self.raw.layout.align())
            .finish()
    }
}

/// Read-only view of a row
///
/// Only columns whose offset carries the mutable flag can be written.
#[derive(Debug)]
pub struct FrozenRow {
    row: RowBuffer,
}

impl FrozenRow {
    /// Typed reference to a column value
    pub fn get<C: TypedColumn>(&self, column: &C) -> Result<&C::Value> {
        self.row.get(column)
    }

    /// Replace the value of a mutable column
    ///
    /// Fails with [`Error::Immutable`] for every other column.
    pub fn set<C: TypedColumn>(&mut self, column: &C, value: C::Value) -> Result<()> {
        let offset = self.row.checked_offset(column)?;
        if !self.row.directory.is_mutable(offset) {
            return Err(Error::Immutable {
                column: column.name().to_string(),
            });
        }
        *unsafe { ColumnDirectory::get_mut(self.row.ptr, offset) } = value;
        Ok(())
    }

    /// Row number, if the directory reserves one
    pub fn row_number(&self) -> Option<usize> {
        self.row.row_number()
    }

    /// Directory the row is laid out by
    pub fn directory(&self) -> &Arc<ColumnDirectory> {
        self.row.directory()
    }

    /// Give up the view and get the writable row back
    pub fn thaw(self) -> RowBuffer {
        self.row
    }
}

/// Heap block of one row, holding no live values of its own
struct RawRow {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl RawRow {
    fn for_directory(directory: &ColumnDirectory) -> Result<Self> {
        let size = directory.total_size();
        let align = directory.alignment();
        let layout =
            Layout::from_size_align(size, align).map_err(|_| Error::Alloc { size, align })?;
        let ptr = if size == 0 {
            // never dereferenced; any aligned address will do
            NonNull::new(align as *mut u8)
        } else {
            NonNull::new(unsafe { alloc(layout) })
        };
        let ptr = ptr.ok_or(Error::Alloc { size, align })?;
        Ok(RawRow { ptr, layout })
    }
}

impl Drop for RawRow {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
        }
    }
}
