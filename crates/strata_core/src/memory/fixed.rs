//! # Fixed-Footprint Arena
//!
//! An arena whose memory footprint never changes between resizes. Block sizes
//! are stored in-band, so no side table is needed, at the cost of linear
//! scans and of losing every allocation on resize.
//!
//! ## Layout
//!
//! ```text
//! +--------+-----------+-----+--------+-----------+---------------+
//! | header | payload   | pad | header | payload   |  unused (0s)  |
//! +--------+-----------+-----+--------+-----------+---------------+
//! ^        ^                 ^
//! 0        FixedAddr         multiple of HEADER_WIDTH
//! ```
//!
//! A header holds the payload length in bytes; 0 marks free space. Headers
//! sit on `HEADER_WIDTH` boundaries so the chain can be walked one word at a
//! time through zeroed regions.

use std::io::{self, Write};
use std::mem;

use bytemuck::Pod;

use super::store::{BackingStore, WORD_WIDTH};
use super::{payload_size, Arena};
use crate::config::ArenaConfig;
use crate::error::{ArenaError, ArenaResult};

/// Width in bytes of the size header in front of every block.
pub const HEADER_WIDTH: usize = WORD_WIDTH;

/// Address of a block's payload inside a [`FixedArena`].
///
/// Only meaningful for the arena (and buffer instance) that returned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedAddr(usize);

impl FixedAddr {
    /// Wraps a raw payload offset.
    #[inline]
    #[must_use]
    pub const fn from_offset(offset: usize) -> Self {
        Self(offset)
    }

    /// Byte offset of the payload from the start of the backing store.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self.0
    }
}

/// One live block found while walking the header chain.
#[derive(Clone, Copy, Debug)]
struct HeaderBlock {
    /// Offset of the header word.
    header: usize,
    /// Payload size in bytes.
    size: usize,
}

impl HeaderBlock {
    #[inline]
    fn addr(self) -> FixedAddr {
        FixedAddr(self.header + HEADER_WIDTH)
    }

    #[inline]
    fn end(self) -> usize {
        self.header + HEADER_WIDTH + self.size
    }

    /// First header slot after this block.
    #[inline]
    fn next_header(self) -> usize {
        align_header(self.end())
    }
}

/// Rounds `offset` up to the next header boundary.
#[inline]
fn align_header(offset: usize) -> usize {
    offset.saturating_add(HEADER_WIDTH - 1) / HEADER_WIDTH * HEADER_WIDTH
}

/// Walks the header chain from offset 0, yielding live blocks in address order.
struct HeaderWalk<'a> {
    store: &'a BackingStore,
    cursor: usize,
}

impl Iterator for HeaderWalk<'_> {
    type Item = HeaderBlock;

    fn next(&mut self) -> Option<HeaderBlock> {
        while let Some(size) = self.store.read_word(self.cursor) {
            let header = self.cursor;
            if size == 0 {
                self.cursor += HEADER_WIDTH;
                continue;
            }
            let block = HeaderBlock { header, size };
            self.cursor = block.next_header();
            return Some(block);
        }
        None
    }
}

/// An arena with a fixed memory footprint and in-band block headers.
///
/// `capacity` is not the number of allocatable bytes: every block also
/// spends [`HEADER_WIDTH`] bytes on its header.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. Use one arena per thread.
///
/// # Example
///
/// ```rust
/// use strata_core::FixedArena;
///
/// let mut arena = FixedArena::new(256);
/// let addr = arena.alloc::<u32>(4)?;
/// arena.set(addr, 2, 7u32)?;
/// assert_eq!(arena.get::<u32>(addr, 2)?, 7);
///
/// arena.free(addr)?;
/// assert!(!arena.is_valid(addr));
/// # Ok::<(), strata_core::ArenaError>(())
/// ```
#[derive(Debug)]
pub struct FixedArena {
    /// The backing storage.
    store: BackingStore,
    /// Bytes per line in memory dumps.
    dump_columns: usize,
}

impl FixedArena {
    /// Creates an arena with the specified capacity in bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            store: BackingStore::new(capacity),
            dump_columns: 0,
        }
    }

    /// Creates an arena from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the config is invalid or the
    /// capacity cannot hold a single header plus one byte.
    pub fn from_config(config: &ArenaConfig) -> ArenaResult<Self> {
        config.validate()?;
        if config.capacity <= HEADER_WIDTH {
            return Err(ArenaError::InvalidConfig(format!(
                "fixed arena capacity must exceed the {HEADER_WIDTH}-byte header"
            )));
        }
        Ok(Self {
            store: BackingStore::new(config.capacity),
            dump_columns: config.dump_columns,
        })
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the backing store, for inspection.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    fn walk(&self) -> HeaderWalk<'_> {
        HeaderWalk {
            store: &self.store,
            cursor: 0,
        }
    }

    /// Allocates `element_width * count` bytes.
    ///
    /// Scans from offset 0 for the first gap that can hold the header and
    /// the payload. The payload is zeroed.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::EmptyAllocation`] if the payload is zero bytes
    /// - [`ArenaError::Exhausted`] if no gap is large enough
    pub fn allocate(&mut self, element_width: usize, count: usize) -> ArenaResult<FixedAddr> {
        let size = payload_size(element_width, count)?;
        let needed = size.saturating_add(HEADER_WIDTH);

        let Some(header) = self.find_free(needed) else {
            tracing::warn!(
                requested = needed,
                capacity = self.capacity(),
                "fixed arena exhausted"
            );
            return Err(ArenaError::Exhausted { requested: needed });
        };

        self.store.write_word(header, size);
        let addr = FixedAddr(header + HEADER_WIDTH);
        tracing::trace!(offset = addr.0, size, "fixed arena: allocated");
        Ok(addr)
    }

    /// Allocates room for `count` values of `T`.
    ///
    /// # Errors
    ///
    /// Same as [`FixedArena::allocate`].
    pub fn alloc<T: Pod>(&mut self, count: usize) -> ArenaResult<FixedAddr> {
        self.allocate(mem::size_of::<T>(), count)
    }

    /// Finds the header offset of the first gap holding `needed` bytes.
    fn find_free(&self, needed: usize) -> Option<usize> {
        let mut gap_start = 0;
        for block in self.walk() {
            if block.header - gap_start >= needed {
                return Some(gap_start);
            }
            gap_start = block.next_header();
        }

        // trailing gap runs to the end of the store, no padding required
        (self.capacity().saturating_sub(gap_start) >= needed).then_some(gap_start)
    }

    /// Looks up the live block whose payload starts at `addr`.
    fn block(&self, addr: FixedAddr) -> Option<HeaderBlock> {
        let header = addr.0.checked_sub(HEADER_WIDTH)?;
        self.walk()
            .take_while(|block| block.header <= header)
            .find(|block| block.header == header)
    }

    /// Returns whether `addr` was returned by an allocation and not freed since.
    #[must_use]
    pub fn is_valid(&self, addr: FixedAddr) -> bool {
        self.block(addr).is_some()
    }

    /// Frees the block at `addr`, zeroing its header and payload.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if `addr` is not a live block.
    pub fn free(&mut self, addr: FixedAddr) -> ArenaResult<()> {
        let block = self.block(addr).ok_or(ArenaError::InvalidHandle)?;
        self.store.zero(block.header..block.end());
        tracing::debug!(offset = addr.0, size = block.size, "fixed arena: freed");
        Ok(())
    }

    /// Returns the number of payload bytes allocated at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if `addr` is not a live block.
    pub fn block_size(&self, addr: FixedAddr) -> ArenaResult<usize> {
        self.block(addr)
            .map(|block| block.size)
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Returns the number of `T` elements that fit in the block at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if `addr` is not a live block.
    pub fn length<T: Pod>(&self, addr: FixedAddr) -> ArenaResult<usize> {
        Ok(self.block_size(addr)? / mem::size_of::<T>().max(1))
    }

    /// Replaces the backing store with a zeroed one of `new_capacity` bytes.
    ///
    /// **Destroys every allocation.** Addresses returned before the resize
    /// must not be used afterwards.
    pub fn resize(&mut self, new_capacity: usize) {
        let dropped = self.walk().count();
        tracing::debug!(
            old_capacity = self.capacity(),
            new_capacity,
            dropped,
            "fixed arena: resized, all blocks discarded"
        );
        self.store = BackingStore::new(new_capacity);
    }

    /// Returns the payload bytes of the block at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if `addr` is not a live block.
    pub fn bytes(&self, addr: FixedAddr) -> ArenaResult<&[u8]> {
        let block = self.block(addr).ok_or(ArenaError::InvalidHandle)?;
        self.store
            .get(addr.0..block.end())
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Returns the payload bytes of the block at `addr` for writing.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if `addr` is not a live block.
    pub fn bytes_mut(&mut self, addr: FixedAddr) -> ArenaResult<&mut [u8]> {
        let block = self.block(addr).ok_or(ArenaError::InvalidHandle)?;
        self.store
            .get_mut(addr.0..block.end())
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Reads element `index` of the block at `addr` as a `T`.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidHandle`] if `addr` is not a live block
    /// - [`ArenaError::OutOfRange`] if `index` is past the last whole element
    pub fn get<T: Pod>(&self, addr: FixedAddr, index: usize) -> ArenaResult<T> {
        let bytes = self.bytes(addr)?;
        let range = element_range::<T>(bytes.len(), index)?;
        Ok(bytemuck::pod_read_unaligned(&bytes[range]))
    }

    /// Writes `value` to element `index` of the block at `addr`.
    ///
    /// # Errors
    ///
    /// Same as [`FixedArena::get`].
    pub fn set<T: Pod>(&mut self, addr: FixedAddr, index: usize, value: T) -> ArenaResult<()> {
        let bytes = self.bytes_mut(addr)?;
        let range = element_range::<T>(bytes.len(), index)?;
        bytes[range].copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Iterates over live blocks as `(address, payload size)` in address order.
    pub fn blocks(&self) -> impl Iterator<Item = (FixedAddr, usize)> + '_ {
        self.walk().map(|block| (block.addr(), block.size))
    }

    /// Returns bytes consumed by live blocks, headers included.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.walk().map(|block| HEADER_WIDTH + block.size).sum()
    }

    /// Writes every byte of the backing store to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `sink`.
    pub fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        self.store.dump(sink, self.dump_columns)
    }
}

/// Byte range of element `index` inside a block of `block_len` bytes.
pub(crate) fn element_range<T>(
    block_len: usize,
    index: usize,
) -> ArenaResult<std::ops::Range<usize>> {
    let width = mem::size_of::<T>();
    let len = block_len / width.max(1);
    if index >= len {
        return Err(ArenaError::OutOfRange { index, len });
    }
    let start = index * width;
    Ok(start..start + width)
}

impl Arena for FixedArena {
    type Handle = FixedAddr;

    fn capacity(&self) -> usize {
        FixedArena::capacity(self)
    }

    fn allocate(&mut self, element_width: usize, count: usize) -> ArenaResult<FixedAddr> {
        FixedArena::allocate(self, element_width, count)
    }

    fn free(&mut self, handle: FixedAddr) -> ArenaResult<()> {
        FixedArena::free(self, handle)
    }

    fn resize(&mut self, new_capacity: usize) -> ArenaResult<()> {
        FixedArena::resize(self, new_capacity);
        Ok(())
    }

    fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        FixedArena::dump(self, sink)
    }
}
