//! # Memory Management
//!
//! Arenas that carve sub-allocations out of one pre-allocated buffer.
//!
//! ## Variants
//!
//! - [`FixedArena`]: in-band size headers, fixed footprint, destructive resize
//! - [`CompactingArena`]: out-of-band block directory, non-destructive resize,
//!   in-place defragmentation, handles ([`ArenaPtr`]) that survive moves
//!   after an explicit reset
//!
//! Neither arena is thread-safe; every mutation takes `&mut self`.

mod compacting;
mod fixed;
mod handle;
mod store;

use std::io::{self, Write};

pub use compacting::{BlockId, BlockInfo, CompactingArena, DefragReport};
pub use fixed::{FixedAddr, FixedArena, HEADER_WIDTH};
pub use handle::ArenaPtr;
pub use store::BackingStore;

use crate::error::{ArenaError, ArenaResult};

/// Operations shared by every arena variant.
pub trait Arena {
    /// What `allocate` hands back to the caller.
    type Handle;

    /// Total size of the backing store in bytes.
    fn capacity(&self) -> usize;

    /// Allocates `element_width * count` bytes.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Exhausted`] when no gap fits, [`ArenaError::EmptyAllocation`]
    /// for zero-byte requests.
    fn allocate(&mut self, element_width: usize, count: usize) -> ArenaResult<Self::Handle>;

    /// Releases a block.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidHandle`] when the block is not live.
    fn free(&mut self, handle: Self::Handle) -> ArenaResult<()>;

    /// Replaces the backing store with one of `new_capacity` bytes.
    ///
    /// # Errors
    ///
    /// Variant specific; see each implementation.
    fn resize(&mut self, new_capacity: usize) -> ArenaResult<()>;

    /// Writes every byte of the backing store to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `sink`.
    fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()>;
}

/// Payload size of a request, rejecting empty and overflowing ones.
pub(crate) fn payload_size(element_width: usize, count: usize) -> ArenaResult<usize> {
    match element_width.checked_mul(count) {
        Some(0) => Err(ArenaError::EmptyAllocation),
        Some(size) => Ok(size),
        None => {
            tracing::warn!(element_width, count, "allocation request overflows usize");
            Err(ArenaError::Exhausted {
                requested: usize::MAX,
            })
        }
    }
}
