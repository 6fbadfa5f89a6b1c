//! Column handles and descriptors
//!
//! - [`Column<T>`]: typed, `Copy` handle naming a column of type `T`. Usually
//!   declared once as a constant and shared by every table that stores it.
//! - [`MutableColumn<T>`]: the same column, qualified as writable through
//!   read-only row views.
//! - [`ColumnDescriptor`]: the type-erased form the directory registers.
//!
//! ```
//! use rowlayout_core::column::{Column, TypedColumn};
//!
//! const PRICE: Column<f64> = Column::new("price");
//! let desc = PRICE.mutable().descriptor();
//! assert!(desc.is_mutable());
//! assert_eq!(desc.code(), PRICE.code());
//! ```

use crate::types::ColumnCode;
use crate::value::{ColumnValue, ValueType};
use std::borrow::Cow;
use std::marker::PhantomData;

/// Common surface of typed column handles
pub trait TypedColumn {
    /// Rust type stored in the column
    type Value: ColumnValue;

    /// Stable code of the column
    fn code(&self) -> ColumnCode;

    /// Display name of the column
    fn name(&self) -> &'static str;

    /// Whether registration marks the column mutable
    fn is_mutable(&self) -> bool;

    /// Type-erased descriptor for registration
    fn descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor::new(self.code(), self.name(), ValueType::of::<Self::Value>())
            .with_mutable(self.is_mutable())
    }
}

/// Typed column handle
pub struct Column<T> {
    code: ColumnCode,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Column<T> {
    /// Column whose code is derived from its name
    pub const fn new(name: &'static str) -> Self {
        Column {
            code: ColumnCode::from_name(name),
            name,
            _marker: PhantomData,
        }
    }

    /// Column with an explicit code
    pub const fn with_code(code: ColumnCode, name: &'static str) -> Self {
        Column {
            code,
            name,
            _marker: PhantomData,
        }
    }

    /// Qualify the column as mutable
    pub const fn mutable(self) -> MutableColumn<T> {
        MutableColumn { column: self }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("code", &self.code)
            .finish()
    }
}

impl<T: ColumnValue> TypedColumn for Column<T> {
    type Value = T;

    #[inline]
    fn code(&self) -> ColumnCode {
        self.code
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_mutable(&self) -> bool {
        false
    }
}

/// Column qualified as writable through read-only row views
pub struct MutableColumn<T> {
    column: Column<T>,
}

impl<T> MutableColumn<T> {
    /// The unqualified column
    pub const fn column(&self) -> Column<T> {
        self.column
    }
}

impl<T> Clone for MutableColumn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MutableColumn<T> {}

impl<T> std::fmt::Debug for MutableColumn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MutableColumn").field(&self.column).finish()
    }
}

impl<T: ColumnValue> TypedColumn for MutableColumn<T> {
    type Value = T;

    #[inline]
    fn code(&self) -> ColumnCode {
        self.column.code
    }

    fn name(&self) -> &'static str {
        self.column.name
    }

    fn is_mutable(&self) -> bool {
        true
    }
}

/// Type-erased column identity registered with a directory
///
/// Immutable once built: code, value-type witness, display name and the
/// mutable qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    code: ColumnCode,
    value_type: ValueType,
    name: Cow<'static, str>,
    mutable: bool,
}

impl ColumnDescriptor {
    /// Create a descriptor
    pub fn new(code: ColumnCode, name: impl Into<Cow<'static, str>>, value_type: ValueType) -> Self {
        ColumnDescriptor {
            code,
            value_type,
            name: name.into(),
            mutable: false,
        }
    }

    /// Descriptor for a column of type `T` with a name-derived code
    pub fn named<T: ColumnValue>(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let code = ColumnCode::from_name(&name);
        ColumnDescriptor::new(code, name, ValueType::of::<T>())
    }

    /// Set the mutable qualifier
    pub fn with_mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    /// Stable code of the column
    #[inline]
    pub fn code(&self) -> ColumnCode {
        self.code
    }

    /// Value-type witness
    #[inline]
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether registration marks this column mutable
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}

impl<T: ColumnValue> From<Column<T>> for ColumnDescriptor {
    fn from(column: Column<T>) -> Self {
        column.descriptor()
    }
}

impl<T: ColumnValue> From<MutableColumn<T>> for ColumnDescriptor {
    fn from(column: MutableColumn<T>) -> Self {
        column.descriptor()
    }
}
