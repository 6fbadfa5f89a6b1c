//! Row buffer lifecycle
//!
//! A row buffer is a caller-owned block of `total_size()` bytes aligned to
//! `alignment()`. The directory never allocates or frees it; it only
//! constructs, copies and drops column values inside it by replaying its
//! layout groups in registration order.
//!
//! ## Construction
//!
//! ```text
//! create_row / import_row
//!   for each group (registration order):
//!     for each column of the group:
//!       copy from source row if the source directory has the code,
//!       otherwise default-construct
//! ```
//!
//! With `reserve_row_number` the row number starts at 0; `import_row` does
//! not copy it.
//!
//! If any column fails (error or panic), every value constructed so far in
//! this call is dropped before the failure propagates, leaving the buffer
//! with no live values.

use crate::directory::ColumnDirectory;
use crate::groups::RowSource;
use crate::guard::Rollback;
use crate::record::ColumnRecord;
use rowlayout_core::ValueResult;
use std::ptr::NonNull;
use tracing::debug;

impl ColumnDirectory {
    /// Default-construct every column of a row
    ///
    /// # Safety
    ///
    /// `row` must be valid for writes of `total_size()` bytes, aligned to
    /// `alignment()`, and hold no live values.
    pub unsafe fn create_row(&self, row: NonNull<u8>) -> ValueResult<()> {
        unsafe { self.construct_row(row, RowSource::Fresh) }
    }

    /// Construct a row from a row of another (or the same) directory
    ///
    /// Columns whose code `source` contains are copy-constructed from
    /// `source_row` at the source's offset; the rest are default-constructed.
    /// A code registered in both directories with different value types is
    /// treated as absent from the source.
    ///
    /// # Safety
    ///
    /// As for [`create_row`](Self::create_row); additionally `source_row`
    /// must be a live row built by `source` in its current state.
    pub unsafe fn import_row(
        &self,
        row: NonNull<u8>,
        source: &ColumnDirectory,
        source_row: NonNull<u8>,
    ) -> ValueResult<()> {
        let source = RowSource::Import {
            directory: source,
            row: source_row.as_ptr(),
        };
        unsafe { self.construct_row(row, source) }
    }

    /// Drop every column of a row
    ///
    /// # Safety
    ///
    /// `row` must be a live row built by this directory in its current state.
    /// The buffer holds no live values afterwards.
    pub unsafe fn destroy_row(&self, row: NonNull<u8>) {
        let columns = self.columns_slice();
        for group in &self.groups {
            unsafe { group.destroy(columns, row.as_ptr()) };
        }
    }

    unsafe fn construct_row(&self, row: NonNull<u8>, source: RowSource<'_>) -> ValueResult<()> {
        if self.config().reserve_row_number {
            unsafe { self.set_row_number(row, 0) };
        }
        let row = row.as_ptr();
        let columns = self.columns_slice();
        let mut guard = Rollback::new(|i: usize| unsafe {
            self.groups[i].destroy(columns, row);
        });
        for group in &self.groups {
            if let Err(err) = unsafe { group.construct(columns, source, row) } {
                debug!(
                    groups = guard.completed(),
                    error = %err,
                    "row construction failed, rolling back"
                );
                return Err(err);
            }
            guard.advance();
        }
        guard.commit();
        Ok(())
    }

    /// Typed reference to the value at `offset`
    ///
    /// # Safety
    ///
    /// `row` must be a live row of a directory that stores a `T` at `offset`,
    /// and the returned reference must not outlive it or alias a mutable one.
    #[inline]
    pub unsafe fn get<'r, T>(row: NonNull<u8>, offset: usize) -> &'r T {
        unsafe { &*row.as_ptr().add(offset).cast::<T>() }
    }

    /// Mutable typed reference to the value at `offset`
    ///
    /// # Safety
    ///
    /// As for [`get`](Self::get), and the reference must be unique.
    #[inline]
    pub unsafe fn get_mut<'r, T>(row: NonNull<u8>, offset: usize) -> &'r mut T {
        unsafe { &mut *row.as_ptr().add(offset).cast::<T>() }
    }

    /// Row number stored in the reserved prefix
    ///
    /// # Safety
    ///
    /// `row` must be valid for reads of `total_size()` bytes.
    pub unsafe fn row_number(&self, row: NonNull<u8>) -> usize {
        debug_assert!(self.config().reserve_row_number);
        unsafe { row.as_ptr().cast::<usize>().read_unaligned() }
    }

    /// Store a row number in the reserved prefix
    ///
    /// # Safety
    ///
    /// `row` must be valid for writes of `total_size()` bytes.
    pub unsafe fn set_row_number(&self, row: NonNull<u8>, number: usize) {
        debug_assert!(self.config().reserve_row_number);
        unsafe { row.as_ptr().cast::<usize>().write_unaligned(number) }
    }

    /// Call `visitor` with every column record and the address of its value
    ///
    /// # Safety
    ///
    /// `row` must be a row buffer of this directory; the visitor must respect
    /// the value types of the records it is given.
    pub unsafe fn visit<F>(&self, row: NonNull<u8>, mut visitor: F)
    where
        F: FnMut(&ColumnRecord, NonNull<u8>),
    {
        for record in self.columns() {
            let ptr = unsafe { NonNull::new_unchecked(row.as_ptr().add(record.offset())) };
            visitor(record, ptr);
        }
    }
}
