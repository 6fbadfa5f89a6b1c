//! Per-offset mutable flags
//!
//! One bit per byte offset of the row. A set bit means the column starting at
//! that offset may be written through a read-only row view. The bitset only
//! grows, together with the directory's total row size.

/// Growable bitset indexed by byte offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutableFlags {
    bits: Vec<u8>,
}

impl MutableFlags {
    /// Empty bitset
    pub fn new() -> Self {
        Self::default()
    }

    /// Make offsets `0..=total_size` addressable
    ///
    /// The last offset is included so that a zero-sized column placed at the
    /// end of the row still has a bit.
    pub fn grow_to(&mut self, total_size: usize) {
        let len = total_size / 8 + 1;
        if len > self.bits.len() {
            self.bits.resize(len, 0);
        }
    }

    /// Number of addressable offsets
    pub fn capacity(&self) -> usize {
        self.bits.len() * 8
    }

    /// Whether the bit at `offset` is set
    #[inline]
    pub fn get(&self, offset: usize) -> bool {
        self.bits
            .get(offset / 8)
            .map_or(false, |byte| byte & (1 << (offset % 8)) != 0)
    }

    /// Set the bit at `offset`
    pub fn set(&mut self, offset: usize) {
        debug_assert!(offset < self.capacity(), "offset {} beyond row", offset);
        if let Some(byte) = self.bits.get_mut(offset / 8) {
            *byte |= 1 << (offset % 8);
        }
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }
}
