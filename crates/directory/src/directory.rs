//! Column directory
//!
//! Assigns every registered column a fixed byte offset inside a flat row
//! buffer and recovers it in O(1) from the column code alone:
//!
//! ```text
//! (v1, v2) = hasher.vertices(code, salt)
//! offset   = addends[v1] + addends[v2]
//! ```
//!
//! ## Schema evolution
//!
//! `add_columns` appends columns at the end of the row. Offsets of existing
//! columns enter the constraint graph as fixed edge weights, so whichever salt
//! the search settles on reproduces every old offset exactly. Rows built
//! before the call stay valid; only the salt and addend table change.
//!
//! ## Failure atomicity
//!
//! All checks and the salt search run against scratch state. The directory
//! is touched only after every fallible step succeeded, so a rejected batch
//! leaves no trace: no codes, no records, no group, same salt.
//!
//! ## Thread Safety
//!
//! `add_columns` takes `&mut self`; lookups and row operations take `&self`
//! and may run concurrently with each other.

use crate::flags::MutableFlags;
use crate::graph::{ConstraintGraph, UNASSIGNED};
use crate::groups::LayoutGroup;
use crate::hasher::VertexHasher;
use crate::record::ColumnRecord;
use rowlayout_core::config::{MAX_LAYOUT_ATTEMPTS, MAX_SALT};
use rowlayout_core::{
    ColumnCode, ColumnDescriptor, DirectoryConfig, SchemaError, SchemaResult, TypedColumn,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

/// Addend table and row geometry produced by one successful salt attempt
struct LayoutPlan {
    salt: u8,
    addends: Vec<usize>,
    attempts: usize,
}

/// Perfect-hash directory of column offsets
///
/// # Example
///
/// ```
/// use rowlayout_core::Column;
/// use rowlayout_directory::ColumnDirectory;
///
/// const ID: Column<i64> = Column::new("id");
/// const NAME: Column<String> = Column::new("name");
///
/// let mut dir = ColumnDirectory::new();
/// dir.add_columns([ID.into(), NAME.into()]).unwrap();
/// assert_ne!(dir.offset_of(&ID), dir.offset_of(&NAME));
/// assert!(dir.total_size() >= 8 + std::mem::size_of::<String>());
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDirectory {
    config: DirectoryConfig,
    hasher: VertexHasher,
    salt: u8,
    addends: Vec<usize>,
    total_size: usize,
    alignment: usize,
    /// Registered codes, mapped to their index in `columns`
    codes: FxHashMap<ColumnCode, usize>,
    columns: Vec<ColumnRecord>,
    pub(crate) groups: Vec<LayoutGroup>,
    mutable: MutableFlags,
}

impl ColumnDirectory {
    /// Empty directory with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(DirectoryConfig::default())
    }

    /// Empty directory with a custom configuration
    ///
    /// Returns [`SchemaError::InvalidConfig`] if the configuration is out of range.
    pub fn with_config(config: DirectoryConfig) -> SchemaResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DirectoryConfig) -> Self {
        let total_size = if config.reserve_row_number {
            std::mem::size_of::<usize>()
        } else {
            0
        };
        let mut mutable = MutableFlags::new();
        mutable.grow_to(total_size);
        ColumnDirectory {
            config,
            hasher: VertexHasher::new(config.log_vertex_count),
            salt: 0,
            addends: vec![UNASSIGNED; config.vertex_count()],
            total_size,
            alignment: 1,
            codes: FxHashMap::default(),
            columns: Vec::new(),
            groups: Vec::new(),
            mutable,
        }
    }

    /// Configuration the directory was created with
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Register a batch of columns
    ///
    /// Columns are appended in the batch's order, each aligned to its value
    /// type. An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::TooManyColumns`] if the directory would exceed its capacity
    /// - [`SchemaError::DuplicateColumnCode`] if a code is already registered or
    ///   appears twice in the batch
    /// - [`SchemaError::LayoutSearchExhausted`] if no salt yields a consistent layout
    ///
    /// On error the directory is unchanged.
    pub fn add_columns<I>(&mut self, batch: I) -> SchemaResult<()>
    where
        I: IntoIterator<Item = ColumnDescriptor>,
    {
        let batch: Vec<ColumnDescriptor> = batch.into_iter().collect();
        if batch.is_empty() {
            return Ok(());
        }
        self.check_batch(&batch)?;

        let offsets = self.batch_offsets(&batch);
        let plan = self.search_layout(&batch, &offsets)?;
        self.commit(batch, &offsets, plan);
        Ok(())
    }

    /// Register a single column
    pub fn add_column(&mut self, column: impl Into<ColumnDescriptor>) -> SchemaResult<()> {
        self.add_columns(std::iter::once(column.into()))
    }

    fn check_batch(&self, batch: &[ColumnDescriptor]) -> SchemaResult<()> {
        let requested = self.columns.len() + batch.len();
        if requested > self.capacity() {
            warn!(
                requested,
                capacity = self.capacity(),
                "rejecting column batch: directory full"
            );
            return Err(SchemaError::TooManyColumns {
                requested,
                capacity: self.capacity(),
            });
        }

        let mut seen = FxHashSet::default();
        for desc in batch {
            if self.codes.contains_key(&desc.code()) || !seen.insert(desc.code()) {
                warn!(column = desc.name(), code = %desc.code(), "rejecting duplicate column code");
                return Err(SchemaError::DuplicateColumnCode {
                    code: desc.code(),
                    name: desc.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Offsets the batch gets when appended after the current row
    fn batch_offsets(&self, batch: &[ColumnDescriptor]) -> Vec<usize> {
        let mut cursor = self.total_size;
        batch
            .iter()
            .map(|desc| {
                let value_type = desc.value_type();
                let offset = align_up(cursor, value_type.align());
                cursor = offset + value_type.size();
                offset
            })
            .collect()
    }

    /// Try salts from the current one upwards until the graph of old and new
    /// columns is consistent
    fn search_layout(
        &self,
        batch: &[ColumnDescriptor],
        offsets: &[usize],
    ) -> SchemaResult<LayoutPlan> {
        let mut attempts = 0;
        for salt in self.salt..=MAX_SALT {
            attempts += 1;
            if let Some(addends) = self.solve_for_salt(salt, batch, offsets) {
                return Ok(LayoutPlan {
                    salt,
                    addends,
                    attempts,
                });
            }
            trace!(salt, "salt rejected: inconsistent constraint graph");
        }

        let columns = self.columns.len() + batch.len();
        warn!(
            attempts,
            columns, "layout search exhausted, cannot add columns"
        );
        Err(SchemaError::LayoutSearchExhausted { attempts, columns })
    }

    fn solve_for_salt(
        &self,
        salt: u8,
        batch: &[ColumnDescriptor],
        offsets: &[usize],
    ) -> Option<Vec<usize>> {
        let mut graph = ConstraintGraph::new(self.hasher.vertex_count());
        for record in &self.columns {
            let (v1, v2) = self.hasher.vertices(record.code(), salt);
            graph.add_edge(v1, v2, record.offset());
        }
        for (desc, &offset) in batch.iter().zip(offsets) {
            let (v1, v2) = self.hasher.vertices(desc.code(), salt);
            graph.add_edge(v1, v2, offset);
        }

        let mut addends = vec![UNASSIGNED; self.hasher.vertex_count()];
        if graph.solve(&mut addends) {
            Some(addends)
        } else {
            None
        }
    }

    fn commit(&mut self, batch: Vec<ColumnDescriptor>, offsets: &[usize], plan: LayoutPlan) {
        let first_column = self.columns.len();
        let mut total_size = self.total_size;
        let mut alignment = self.alignment;
        for (desc, &offset) in batch.iter().zip(offsets) {
            total_size = offset + desc.value_type().size();
            alignment = alignment.max(desc.value_type().align());
        }

        self.columns.reserve(batch.len());
        self.codes.reserve(batch.len());
        self.groups.reserve(1);

        self.salt = plan.salt;
        self.addends = plan.addends;
        self.total_size = total_size;
        self.alignment = alignment;
        self.mutable.grow_to(total_size);

        let types = batch.iter().map(|desc| *desc.value_type()).collect();
        for (desc, &offset) in batch.into_iter().zip(offsets) {
            debug_assert_eq!(self.lookup(desc.code()), offset);
            if desc.is_mutable() {
                self.mutable.set(offset);
            }
            self.codes.insert(desc.code(), self.columns.len());
            self.columns.push(ColumnRecord::new(desc, offset));
        }
        self.groups.push(LayoutGroup::for_batch(first_column, types));

        debug!(
            columns = self.columns.len() - first_column,
            total_columns = self.columns.len(),
            salt = self.salt,
            attempts = plan.attempts,
            total_size = self.total_size,
            alignment = self.alignment,
            "column batch registered"
        );
    }

    #[inline]
    fn lookup(&self, code: ColumnCode) -> usize {
        let (v1, v2) = self.hasher.vertices(code, self.salt);
        self.addends[v1].wrapping_add(self.addends[v2])
    }

    /// Byte offset of a registered column
    ///
    /// O(1): two table reads and an add. Passing an unregistered code is a
    /// programmer error, caught by a debug assertion; release builds return an
    /// unspecified offset. Use [`contains`](Self::contains) when membership is
    /// in doubt.
    #[inline]
    pub fn offset(&self, code: ColumnCode) -> usize {
        debug_assert!(
            self.codes.contains_key(&code),
            "column code {} is not registered",
            code
        );
        let offset = self.lookup(code);
        debug_assert!(offset <= self.total_size);
        offset
    }

    /// Byte offset of a typed column
    #[inline]
    pub fn offset_of<C: TypedColumn>(&self, column: &C) -> usize {
        self.offset(column.code())
    }

    /// Offset of `code` if it is registered
    ///
    /// Both vertices must be occupied and the code itself registered: two
    /// unrelated codes can land on occupied vertices.
    pub fn contains(&self, code: ColumnCode) -> Option<usize> {
        let (v1, v2) = self.hasher.vertices(code, self.salt);
        let (a1, a2) = (self.addends[v1], self.addends[v2]);
        if a1 == UNASSIGNED || a2 == UNASSIGNED {
            return None;
        }
        if !self.codes.contains_key(&code) {
            return None;
        }
        Some(a1.wrapping_add(a2))
    }

    /// Record of a registered column
    pub fn column(&self, code: ColumnCode) -> Option<&ColumnRecord> {
        self.codes.get(&code).map(|&index| &self.columns[index])
    }

    /// Registered columns in registration order
    pub fn columns(&self) -> std::slice::Iter<'_, ColumnRecord> {
        self.columns.iter()
    }

    pub(crate) fn columns_slice(&self) -> &[ColumnRecord] {
        &self.columns
    }

    /// Layout groups in registration order
    pub fn groups(&self) -> &[LayoutGroup] {
        &self.groups
    }

    /// Number of layout groups, one per successful non-empty batch
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of registered columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column is registered
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Maximum number of columns
    pub fn capacity(&self) -> usize {
        self.config.max_column_count()
    }

    /// Current salt of the vertex hash
    pub fn salt(&self) -> u8 {
        self.salt
    }

    /// Row size in bytes
    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Required alignment of a row buffer
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Whether the column at `offset` is writable through read-only views
    #[inline]
    pub fn is_mutable(&self, offset: usize) -> bool {
        debug_assert!(offset <= self.total_size);
        self.mutable.get(offset)
    }

    /// Mark the column at `offset` writable through read-only views
    pub fn set_mutable(&mut self, offset: usize) {
        debug_assert!(offset <= self.total_size);
        self.mutable.set(offset);
    }

    /// Salt ceiling reached by the search
    pub fn max_attempts() -> usize {
        MAX_LAYOUT_ATTEMPTS
    }
}

impl Default for ColumnDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn align_up(offset: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}
