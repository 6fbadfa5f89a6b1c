//! Vertex hashing
//!
//! Maps a column code and a salt to two distinct vertices of the directory's
//! vertex universe. A column's offset is the sum of the addends stored at
//! those two vertices.
//!
//! The code is folded down to `2 * log_vertex_count` meaningful bits; the low
//! half picks the first vertex and the high half the second. Each half is
//! XORed with one nibble of the salt, so every salt yields a different graph
//! over the same codes.

use rowlayout_core::ColumnCode;

/// Pure `(code, salt) -> (v1, v2)` mapping for one vertex universe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexHasher {
    log_vertex_count: u32,
}

impl VertexHasher {
    /// Hasher over `1 << log_vertex_count` vertices
    pub fn new(log_vertex_count: u32) -> Self {
        debug_assert!((4..16).contains(&log_vertex_count));
        VertexHasher { log_vertex_count }
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        1usize << self.log_vertex_count
    }

    /// The two vertices of `code` under `salt`
    ///
    /// Always returns two different vertices, both below `vertex_count()`.
    #[inline]
    pub fn vertices(&self, code: ColumnCode, salt: u8) -> (usize, usize) {
        let mask = (1u64 << self.log_vertex_count) - 1;
        let code = code.as_u64();
        let mut short = code.wrapping_add(code >> 32);
        short = short.wrapping_add(short >> 16);
        if self.log_vertex_count < 8 {
            short = short.wrapping_add(short >> 8);
        }
        let salt = u64::from(salt);
        let v1 = (short & mask) ^ (salt >> 4);
        let mut v2 = ((short >> self.log_vertex_count) & mask) ^ (salt & 0xF);
        if v1 == v2 {
            v2 ^= 1;
        }
        (v1 as usize, v2 as usize)
    }
}
