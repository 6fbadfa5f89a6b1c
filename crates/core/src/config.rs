//! Directory configuration
//!
//! A directory's vertex universe is fixed when it is created. Everything else
//! (capacity, hash width) derives from `log_vertex_count`:
//!
//! ```text
//! log_vertex_count (4..=15, default 8)
//!       │
//!       ├─> vertex_count      = 1 << log_vertex_count
//!       │
//!       └─> max_column_count  = 1 << (log_vertex_count - 1)
//!             Half the vertices: the constraint graph stays sparse enough
//!             for the salt search to succeed quickly.
//!
//! MAX_SALT (255)
//!       └─> at most MAX_SALT + 1 layout attempts per add_columns call
//! ```

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted `log_vertex_count`
pub const MIN_LOG_VERTEX_COUNT: u32 = 4;

/// Largest accepted `log_vertex_count`
pub const MAX_LOG_VERTEX_COUNT: u32 = 15;

/// Default `log_vertex_count` (256 vertices, 128 columns)
pub const DEFAULT_LOG_VERTEX_COUNT: u32 = 8;

/// Largest salt the layout search tries
pub const MAX_SALT: u8 = u8::MAX;

/// Number of layout attempts before giving up
pub const MAX_LAYOUT_ATTEMPTS: usize = MAX_SALT as usize + 1;

const _: () = assert!(
    MIN_LOG_VERTEX_COUNT <= DEFAULT_LOG_VERTEX_COUNT
        && DEFAULT_LOG_VERTEX_COUNT <= MAX_LOG_VERTEX_COUNT,
    "DEFAULT_LOG_VERTEX_COUNT must lie in the accepted range"
);

// The salt is split into two nibbles, each XORed into one vertex index.
const _: () = assert!(
    (1u32 << MIN_LOG_VERTEX_COUNT) > 0xF,
    "every vertex universe must be wide enough for a salt nibble"
);

/// Configuration of a column directory - immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Base-2 logarithm of the vertex universe size
    pub log_vertex_count: u32,

    /// Reserve a `usize` row-number slot at the start of every row
    pub reserve_row_number: bool,
}

impl DirectoryConfig {
    /// Create a validated configuration
    ///
    /// Returns an error if `log_vertex_count` is outside `4..=15`.
    pub fn new(log_vertex_count: u32) -> SchemaResult<Self> {
        let config = DirectoryConfig {
            log_vertex_count,
            ..DirectoryConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable the row-number slot
    pub fn with_row_number(mut self, reserve: bool) -> Self {
        self.reserve_row_number = reserve;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> SchemaResult<()> {
        if !(MIN_LOG_VERTEX_COUNT..=MAX_LOG_VERTEX_COUNT).contains(&self.log_vertex_count) {
            return Err(SchemaError::InvalidConfig(format!(
                "log_vertex_count {} (must be in {}..={})",
                self.log_vertex_count, MIN_LOG_VERTEX_COUNT, MAX_LOG_VERTEX_COUNT
            )));
        }
        Ok(())
    }

    /// Number of vertices in the hash universe
    #[inline]
    pub fn vertex_count(&self) -> usize {
        1usize << self.log_vertex_count
    }

    /// Maximum number of columns a directory can hold
    #[inline]
    pub fn max_column_count(&self) -> usize {
        1usize << (self.log_vertex_count - 1)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        DirectoryConfig {
            log_vertex_count: DEFAULT_LOG_VERTEX_COUNT,
            reserve_row_number: false,
        }
    }
}
