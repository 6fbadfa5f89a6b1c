//! Value-type witnesses for column storage
//!
//! A directory never knows the concrete Rust type of a column. It only
//! sequences calls into a [`ValueType`], a type-erased witness carrying the
//! size, alignment and in-place create/copy/drop operations of one type.
//!
//! ## Collaborator contract
//!
//! Types stored in rows implement [`ColumnValue`]. Construction may fail
//! (`create`, `copy_from` return [`ValueResult`]); dropping never fails.
//! Plain data types get an implementation through their `Default` and
//! `Clone` impls.

use crate::error::ValueResult;
use std::any::TypeId;

/// A type that can live in a row buffer
pub trait ColumnValue: Sized + Send + Sync + 'static {
    /// Build the value a freshly created row holds
    fn create() -> ValueResult<Self>;

    /// Build a copy of `src` for an imported row
    fn copy_from(src: &Self) -> ValueResult<Self>;
}

macro_rules! impl_column_value_via_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ColumnValue for $ty {
                #[inline]
                fn create() -> ValueResult<Self> {
                    Ok(<$ty>::default())
                }

                #[inline]
                fn copy_from(src: &Self) -> ValueResult<Self> {
                    Ok(src.clone())
                }
            }
        )*
    };
}

impl_column_value_via_default!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);

impl<T: Clone + Send + Sync + 'static> ColumnValue for Vec<T> {
    fn create() -> ValueResult<Self> {
        Ok(Vec::new())
    }

    fn copy_from(src: &Self) -> ValueResult<Self> {
        Ok(src.clone())
    }
}

impl<T: Clone + Send + Sync + 'static> ColumnValue for Option<T> {
    fn create() -> ValueResult<Self> {
        Ok(None)
    }

    fn copy_from(src: &Self) -> ValueResult<Self> {
        Ok(src.clone())
    }
}

impl<T: Copy + Default + Send + Sync + 'static, const N: usize> ColumnValue for [T; N] {
    fn create() -> ValueResult<Self> {
        Ok([T::default(); N])
    }

    fn copy_from(src: &Self) -> ValueResult<Self> {
        Ok(*src)
    }
}

/// Type-erased witness of a [`ColumnValue`] type
///
/// Holds the layout of the type and monomorphized function pointers that
/// construct, copy and drop a value at a raw address.
#[derive(Clone, Copy)]
pub struct ValueType {
    size: usize,
    align: usize,
    type_id: TypeId,
    type_name: &'static str,
    create: unsafe fn(*mut u8) -> ValueResult<()>,
    copy: unsafe fn(*mut u8, *const u8) -> ValueResult<()>,
    drop: unsafe fn(*mut u8),
}

impl ValueType {
    /// Witness for `T`
    pub fn of<T: ColumnValue>() -> Self {
        ValueType {
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            create: create_in_place::<T>,
            copy: copy_in_place::<T>,
            drop: drop_in_place::<T>,
        }
    }

    /// Size of the value in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Required alignment of the value
    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    /// TypeId of the erased type
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the erased type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this witness erases `T`
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Construct a fresh value at `dst`
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `size()` bytes, aligned to `align()`,
    /// and must not hold a live value.
    #[inline]
    pub unsafe fn create_at(&self, dst: *mut u8) -> ValueResult<()> {
        (self.create)(dst)
    }

    /// Copy-construct the value at `src` into `dst`
    ///
    /// # Safety
    ///
    /// As for [`create_at`](Self::create_at); additionally `src` must point to
    /// a live value of the same type.
    #[inline]
    pub unsafe fn copy_at(&self, dst: *mut u8, src: *const u8) -> ValueResult<()> {
        (self.copy)(dst, src)
    }

    /// Drop the value at `dst` in place
    ///
    /// # Safety
    ///
    /// `dst` must point to a live value of this type; it is dead afterwards.
    #[inline]
    pub unsafe fn drop_at(&self, dst: *mut u8) {
        (self.drop)(dst)
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ValueType {}

impl std::fmt::Debug for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueType")
            .field("type_name", &self.type_name)
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

unsafe fn create_in_place<T: ColumnValue>(dst: *mut u8) -> ValueResult<()> {
    let value = T::create()?;
    std::ptr::write(dst.cast::<T>(), value);
    Ok(())
}

unsafe fn copy_in_place<T: ColumnValue>(dst: *mut u8, src: *const u8) -> ValueResult<()> {
    let value = T::copy_from(&*src.cast::<T>())?;
    std::ptr::write(dst.cast::<T>(), value);
    Ok(())
}

unsafe fn drop_in_place<T: ColumnValue>(dst: *mut u8) {
    std::ptr::drop_in_place(dst.cast::<T>());
}
