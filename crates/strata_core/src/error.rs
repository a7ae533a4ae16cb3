//! # Arena Error Types
//!
//! All errors that can occur while allocating from or addressing into an arena.

use thiserror::Error;

/// Errors that can occur in the arena system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// No contiguous gap is large enough for the request.
    ///
    /// Recoverable: free, defragment or resize, then retry.
    #[error("arena exhausted: no contiguous gap of {requested} bytes")]
    Exhausted {
        /// Bytes the arena had to find, including any header.
        requested: usize,
    },

    /// A request for zero bytes. Neither arena can represent an empty block.
    #[error("cannot allocate a zero-sized block")]
    EmptyAllocation,

    /// The address or handle does not refer to a live block.
    #[error("address or handle does not refer to a live block")]
    InvalidHandle,

    /// The handle's block was relocated since the handle was bound or reset.
    #[error("handle is stale: its block moved, reset the handle before use")]
    StaleHandle,

    /// Element index beyond the end of the block.
    #[error("index {index} out of range for block of {len} elements")]
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of elements in the block.
        len: usize,
    },

    /// Live data does not fit in the requested capacity.
    #[error("live data ({live} bytes) does not fit in a capacity of {capacity} bytes")]
    DoesNotFit {
        /// Bytes currently held by live blocks.
        live: usize,
        /// The capacity that was requested.
        capacity: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
