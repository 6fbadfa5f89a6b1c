//! Layout groups
//!
//! Every successful `add_columns` call appends one [`LayoutGroup`]. A group
//! owns the type-erased operations that construct and destroy exactly the
//! columns of its batch, so a row is built by replaying every group in
//! registration order. Columns of different batches may have types that were
//! never known together at compile time; each group only knows its own.

use crate::directory::ColumnDirectory;
use crate::guard::Rollback;
use crate::record::ColumnRecord;
use rowlayout_core::{ValueResult, ValueType};
use std::sync::Arc;
use tracing::trace;

/// Where the values of a row under construction come from
#[derive(Clone, Copy)]
pub(crate) enum RowSource<'a> {
    /// Default-construct every column
    Fresh,
    /// Copy columns present in `directory` from `row`, default-construct the rest
    Import {
        directory: &'a ColumnDirectory,
        row: *const u8,
    },
}

impl RowSource<'_> {
    /// Address of the source value for `record`, if the source has it
    ///
    /// # Safety
    ///
    /// For `Import`, `row` must be a live row of `directory`.
    unsafe fn locate(&self, record: &ColumnRecord) -> Option<*const u8> {
        match *self {
            RowSource::Fresh => None,
            RowSource::Import { directory, row } => {
                let offset = directory.contains(record.code())?;
                let same_type = directory
                    .column(record.code())
                    .map_or(false, |src| src.value_type() == record.value_type());
                if !same_type {
                    trace!(column = record.name(), "source column has another type, creating default");
                    return None;
                }
                Some(unsafe { row.add(offset) })
            }
        }
    }
}

/// Construct/destroy operations for one registered batch
pub(crate) trait GroupOps: Send + Sync {
    /// Construct every column of the batch in `row`
    ///
    /// On failure, columns of this batch constructed so far are dropped
    /// before the error is returned.
    ///
    /// # Safety
    ///
    /// `row` must be a row buffer of the owning directory whose batch columns
    /// hold no live values; `records` must be this batch's records.
    unsafe fn construct(
        &self,
        records: &[ColumnRecord],
        source: RowSource<'_>,
        row: *mut u8,
    ) -> ValueResult<()>;

    /// Drop every column of the batch in `row`
    ///
    /// # Safety
    ///
    /// Every column of the batch must hold a live value.
    unsafe fn destroy(&self, records: &[ColumnRecord], row: *mut u8);
}

/// Operations of a batch, captured from its value types at registration
struct BatchOps {
    types: Box<[ValueType]>,
}

impl GroupOps for BatchOps {
    unsafe fn construct(
        &self,
        records: &[ColumnRecord],
        source: RowSource<'_>,
        row: *mut u8,
    ) -> ValueResult<()> {
        debug_assert_eq!(records.len(), self.types.len());
        let mut guard = Rollback::new(|i: usize| unsafe {
            self.types[i].drop_at(row.add(records[i].offset()));
        });
        for (record, value_type) in records.iter().zip(self.types.iter()) {
            let dst = unsafe { row.add(record.offset()) };
            match unsafe { source.locate(record) } {
                Some(src) => unsafe { value_type.copy_at(dst, src)? },
                None => unsafe { value_type.create_at(dst)? },
            }
            guard.advance();
        }
        guard.commit();
        Ok(())
    }

    unsafe fn destroy(&self, records: &[ColumnRecord], row: *mut u8) {
        for (record, value_type) in records.iter().zip(self.types.iter()) {
            unsafe { value_type.drop_at(row.add(record.offset())) };
        }
    }
}

/// One schema-evolution step: a contiguous run of column records plus the
/// operations that build and tear down their values
#[derive(Clone)]
pub struct LayoutGroup {
    first_column: usize,
    column_count: usize,
    ops: Arc<dyn GroupOps>,
}

impl LayoutGroup {
    pub(crate) fn for_batch(first_column: usize, types: Vec<ValueType>) -> Self {
        LayoutGroup {
            first_column,
            column_count: types.len(),
            ops: Arc::new(BatchOps {
                types: types.into_boxed_slice(),
            }),
        }
    }

    /// Index of the group's first column in registration order
    pub fn first_column(&self) -> usize {
        self.first_column
    }

    /// Number of columns registered by the group
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The group's slice of the directory's column records
    pub fn records<'a>(&self, columns: &'a [ColumnRecord]) -> &'a [ColumnRecord] {
        &columns[self.first_column..self.first_column + self.column_count]
    }

    /// # Safety
    ///
    /// See [`GroupOps::construct`]; `columns` is the directory's full record list.
    pub(crate) unsafe fn construct(
        &self,
        columns: &[ColumnRecord],
        source: RowSource<'_>,
        row: *mut u8,
    ) -> ValueResult<()> {
        unsafe { self.ops.construct(self.records(columns), source, row) }
    }

    /// # Safety
    ///
    /// See [`GroupOps::destroy`]; `columns` is the directory's full record list.
    pub(crate) unsafe fn destroy(&self, columns: &[ColumnRecord], row: *mut u8) {
        unsafe { self.ops.destroy(self.records(columns), row) }
    }
}

impl std::fmt::Debug for LayoutGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutGroup")
            .field("first_column", &self.first_column)
            .field("column_count", &self.column_count)
            .finish()
    }
}
