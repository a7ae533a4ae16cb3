//! # Compacting Arena
//!
//! An arena that keeps its block bookkeeping out of the buffer. The
//! *directory* is a side table of `[start, end)` ranges sorted by start, one
//! per live block. With no headers in the payload region, blocks can be
//! moved freely, which is what makes [`CompactingArena::defragment`] and the
//! non-destructive [`CompactingArena::resize`] possible.
//!
//! ```text
//! store:      [ A A A A | . . . . | B B B B B B | . . ]
//! directory:  A=[0,4)  B=[8,14)
//!
//! defragment
//!
//! store:      [ A A A A | B B B B B B | . . . . . . ]
//! directory:  A=[0,4)  B=[4,10)
//! ```
//!
//! Callers hold [`ArenaPtr`] handles bound to a [`BlockId`]. Ids are never
//! reused, so inserting or removing entries cannot retarget another handle.

use std::io::{self, Write};
use std::ops::Range;

use bytemuck::Pod;

use super::fixed::element_range;
use super::handle::{width_of, ArenaPtr};
use super::store::BackingStore;
use super::{payload_size, Arena};
use crate::config::ArenaConfig;
use crate::error::{ArenaError, ArenaResult};

/// Identity of a block, unique for the lifetime of its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BlockId(u64);

impl BlockId {
    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// A half-open byte range `[start, end)` inside the backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    start: usize,
    end: usize,
}

impl BlockInfo {
    #[inline]
    const fn new(start: usize, size: usize) -> Self {
        Self {
            start,
            end: start + size,
        }
    }

    /// First byte of the block.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last byte of the block.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Block length in bytes. Always nonzero.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.end - self.start
    }

    /// The block as a byte range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One row of the directory.
#[derive(Clone, Copy, Debug)]
struct DirectoryEntry {
    id: BlockId,
    info: BlockInfo,
}

/// Outcome of a [`CompactingArena::defragment`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefragReport {
    /// Blocks that changed position. Handles to these need a reset.
    pub blocks_moved: usize,
    /// Payload bytes copied.
    pub bytes_moved: usize,
    /// Contiguous free bytes at the end of the store after compaction.
    pub free_tail: usize,
}

/// An arena with an out-of-band block directory.
///
/// Unlike [`FixedArena`](super::FixedArena), `capacity` is exactly the
/// number of allocatable bytes.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. Use one arena per thread.
///
/// # Example
///
/// ```rust
/// use strata_core::CompactingArena;
///
/// let mut arena = CompactingArena::new(64);
/// let a = arena.alloc::<u32>(4)?;
/// let mut b = arena.alloc::<u32>(4)?;
/// arena.set(&b, 0, 99u32)?;
///
/// arena.free(a)?;
/// arena.defragment();
///
/// // `b` moved into the hole left by `a`
/// b.reset(&arena)?;
/// assert_eq!(arena.get(&b, 0)?, 99u32);
/// # Ok::<(), strata_core::ArenaError>(())
/// ```
#[derive(Debug)]
pub struct CompactingArena {
    /// The backing storage.
    store: BackingStore,
    /// Live blocks, sorted by start.
    directory: Vec<DirectoryEntry>,
    /// Next block id to hand out.
    next_id: u64,
    /// Bytes per line in memory dumps.
    dump_columns: usize,
}

impl CompactingArena {
    /// Creates an arena with the specified capacity in bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            store: BackingStore::new(capacity),
            directory: Vec::new(),
            next_id: 0,
            dump_columns: 0,
        }
    }

    /// Creates an arena from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the config is invalid.
    pub fn from_config(config: &ArenaConfig) -> ArenaResult<Self> {
        config.validate()?;
        let mut arena = Self::new(config.capacity);
        arena.dump_columns = config.dump_columns;
        Ok(arena)
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

    /// Allocates `element_width * count` bytes, first fit.
    ///
    /// The handle views the block as bytes; use [`ArenaPtr::cast`] or
    /// [`CompactingArena::alloc`] for typed access. The block is zeroed.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::EmptyAllocation`] if the payload is zero bytes
    /// - [`ArenaError::Exhausted`] if no gap is large enough
    pub fn allocate(&mut self, element_width: usize, count: usize) -> ArenaResult<ArenaPtr<u8>> {
        let size = payload_size(element_width, count)?;

        let Some((start, index)) = self.find_free(size) else {
            tracing::warn!(
                requested = size,
                free = self.free_bytes(),
                largest_gap = self.largest_gap(),
                "compacting arena exhausted"
            );
            return Err(ArenaError::Exhausted { requested: size });
        };

        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.directory.insert(
            index,
            DirectoryEntry {
                id,
                info: BlockInfo::new(start, size),
            },
        );

        tracing::trace!(block = id.0, start, size, "compacting arena: allocated");
        Ok(ArenaPtr::bind(id, start))
    }

    /// Allocates room for `count` values of `T`.
    ///
    /// # Errors
    ///
    /// Same as [`CompactingArena::allocate`].
    pub fn alloc<T: Pod>(&mut self, count: usize) -> ArenaResult<ArenaPtr<T>> {
        Ok(self.allocate(std::mem::size_of::<T>(), count)?.cast())
    }

    /// Finds the first gap of `size` bytes.
    ///
    /// Returns the gap start and the directory index a new entry goes to.
    fn find_free(&self, size: usize) -> Option<(usize, usize)> {
        let mut cursor = 0;
        for (index, entry) in self.directory.iter().enumerate() {
            if entry.info.start - cursor >= size {
                return Some((cursor, index));
            }
            cursor = entry.info.end;
        }
        (self.capacity() - cursor >= size).then_some((cursor, self.directory.len()))
    }

    /// Directory index of `id`, by linear scan.
    fn position_of(&self, id: BlockId) -> Option<usize> {
        self.directory.iter().position(|entry| entry.id == id)
    }

    /// Directory index of a handle's block, wherever the block is now.
    fn index_of<T>(&self, ptr: &ArenaPtr<T>) -> Option<usize> {
        match self.fresh_index(ptr) {
            Some(index) => Some(index),
            None => self.position_of(ptr.block_id()),
        }
    }

    /// Directory index of a handle's block if it still starts at the
    /// handle's base.
    fn fresh_index<T>(&self, ptr: &ArenaPtr<T>) -> Option<usize> {
        let index = self
            .directory
            .binary_search_by_key(&ptr.base(), |entry| entry.info.start)
            .ok()?;
        (self.directory[index].id == ptr.block_id()).then_some(index)
    }

    /// Resolves a handle to its block, checking liveness and freshness.
    fn resolve<T>(&self, ptr: &ArenaPtr<T>) -> ArenaResult<BlockInfo> {
        if let Some(index) = self.fresh_index(ptr) {
            return Ok(self.directory[index].info);
        }
        if self.position_of(ptr.block_id()).is_some() {
            Err(ArenaError::StaleHandle)
        } else {
            Err(ArenaError::InvalidHandle)
        }
    }

    /// Current start of block `id`.
    pub(crate) fn current_start(&self, id: BlockId) -> ArenaResult<usize> {
        self.position_of(id)
            .map(|index| self.directory[index].info.start)
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Frees the handle's block and zeroes its bytes.
    ///
    /// Works on stale handles too: the block is found by identity.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if the block was already freed.
    pub fn free<T>(&mut self, ptr: ArenaPtr<T>) -> ArenaResult<()> {
        let index = self.index_of(&ptr).ok_or(ArenaError::InvalidHandle)?;
        let entry = self.directory.remove(index);
        self.store.zero(entry.info.range());
        tracing::debug!(
            block = entry.id.0,
            start = entry.info.start,
            size = entry.info.size(),
            "compacting arena: freed"
        );
        Ok(())
    }

    /// Resynchronizes `ptr` with its block. See [`ArenaPtr::reset`].
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`] if the block was freed.
    pub fn reset_handle<T>(&self, ptr: &mut ArenaPtr<T>) -> ArenaResult<()> {
        ptr.reset(self)
    }

    /// Returns whether the handle's block is still allocated, moved or not.
    #[must_use]
    pub fn is_live<T>(&self, ptr: &ArenaPtr<T>) -> bool {
        self.index_of(ptr).is_some()
    }

    /// Returns the directory entry of the handle's block.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidHandle`] or [`ArenaError::StaleHandle`].
    pub fn block_info<T>(&self, ptr: &ArenaPtr<T>) -> ArenaResult<BlockInfo> {
        self.resolve(ptr)
    }

    /// Number of whole `T` elements in the handle's block.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidHandle`] or [`ArenaError::StaleHandle`].
    pub fn len<T>(&self, ptr: &ArenaPtr<T>) -> ArenaResult<usize> {
        Ok(self.resolve(ptr)?.size() / width_of::<T>())
    }

    /// Returns the bytes of the handle's block.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidHandle`] or [`ArenaError::StaleHandle`].
    pub fn bytes<T>(&self, ptr: &ArenaPtr<T>) -> ArenaResult<&[u8]> {
        let info = self.resolve(ptr)?;
        self.store
            .get(info.range())
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Returns the bytes of the handle's block for writing.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidHandle`] or [`ArenaError::StaleHandle`].
    pub fn bytes_mut<T>(&mut self, ptr: &ArenaPtr<T>) -> ArenaResult<&mut [u8]> {
        let info = self.resolve(ptr)?;
        self.store
            .get_mut(info.range())
            .ok_or(ArenaError::InvalidHandle)
    }

    /// Reads element `index` of the block, counted from the block start.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidHandle`] or [`ArenaError::StaleHandle`]
    /// - [`ArenaError::OutOfRange`] if `index >= len`
    pub fn get<T: Pod>(&self, ptr: &ArenaPtr<T>, index: usize) -> ArenaResult<T> {
        let bytes = self.bytes(ptr)?;
        let range = element_range::<T>(bytes.len(), index)?;
        Ok(bytemuck::pod_read_unaligned(&bytes[range]))
    }

    /// Writes element `index` of the block, counted from the block start.
    ///
    /// # Errors
    ///
    /// Same as [`CompactingArena::get`].
    pub fn set<T: Pod>(&mut self, ptr: &ArenaPtr<T>, index: usize, value: T) -> ArenaResult<()> {
        let bytes = self.bytes_mut(ptr)?;
        let range = element_range::<T>(bytes.len(), index)?;
        bytes[range].copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Reads the element at the handle's current position.
    ///
    /// # Errors
    ///
    /// Same as [`CompactingArena::get`].
    pub fn read<T: Pod>(&self, ptr: &ArenaPtr<T>) -> ArenaResult<T> {
        self.get(ptr, ptr.position())
    }

    /// Writes the element at the handle's current position.
    ///
    /// # Errors
    ///
    /// Same as [`CompactingArena::get`].
    pub fn write<T: Pod>(&mut self, ptr: &ArenaPtr<T>, value: T) -> ArenaResult<()> {
        self.set(ptr, ptr.position(), value)
    }

    /// Slides every live block toward offset 0, closing all gaps.
    ///
    /// Blocks keep their directory order. The freed tail is zero-filled.
    /// Every copied byte is copied once. Handles to moved blocks become
    /// stale and must be reset before further use.
    pub fn defragment(&mut self) -> DefragReport {
        let mut report = DefragReport::default();
        let mut cursor = 0;

        for entry in &mut self.directory {
            let size = entry.info.size();
            if entry.info.start != cursor {
                self.store.copy_within(entry.info.range(), cursor);
                entry.info = BlockInfo::new(cursor, size);
                report.blocks_moved += 1;
                report.bytes_moved += size;
            }
            cursor += size;
        }

        let capacity = self.store.capacity();
        self.store.zero(cursor..capacity);
        report.free_tail = capacity - cursor;

        tracing::debug!(
            blocks_moved = report.blocks_moved,
            bytes_moved = report.bytes_moved,
            free_tail = report.free_tail,
            "compacting arena: defragmented"
        );
        report
    }

    /// Moves all live data into a new store of `new_capacity` bytes.
    ///
    /// Blocks are packed from offset 0 in directory order, as after
    /// [`CompactingArena::defragment`]; handles to moved blocks must be reset.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::DoesNotFit`] if live data exceeds
    /// `new_capacity`. The arena is left untouched.
    pub fn resize(&mut self, new_capacity: usize) -> ArenaResult<()> {
        let live = self.live_bytes();
        if live > new_capacity {
            tracing::warn!(live, new_capacity, "compacting arena: resize rejected");
            return Err(ArenaError::DoesNotFit {
                live,
                capacity: new_capacity,
            });
        }

        let mut store = BackingStore::new(new_capacity);
        let mut cursor = 0;
        for entry in &mut self.directory {
            let size = entry.info.size();
            store.copy_from(&self.store, entry.info.range(), cursor);
            entry.info = BlockInfo::new(cursor, size);
            cursor += size;
        }

        tracing::debug!(
            old_capacity = self.store.capacity(),
            new_capacity,
            live,
            "compacting arena: resized"
        );
        self.store = store;
        Ok(())
    }

    /// Iterates over the directory in address order.
    pub fn directory(&self) -> impl Iterator<Item = (BlockId, BlockInfo)> + '_ {
        self.directory.iter().map(|entry| (entry.id, entry.info))
    }

    /// Number of live blocks.
    #[inline]
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.directory.len()
    }

    /// Bytes held by live blocks.
    #[must_use]
    pub fn live_bytes(&self) -> usize {
        self.directory.iter().map(|entry| entry.info.size()).sum()
    }

    /// Bytes not held by any block.
    #[must_use]
    pub fn free_bytes(&self) -> usize {
        self.capacity() - self.live_bytes()
    }

    /// Size of the largest contiguous gap, i.e. the largest request that
    /// can succeed without defragmenting.
    #[must_use]
    pub fn largest_gap(&self) -> usize {
        let mut cursor = 0;
        let mut largest = 0;
        for entry in &self.directory {
            largest = largest.max(entry.info.start - cursor);
            cursor = entry.info.end;
        }
        largest.max(self.capacity() - cursor)
    }

    /// Share of free space unusable for a single request: `1 - largest_gap / free`.
    ///
    /// 0.0 when all free space is contiguous (or there is none).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fragmentation(&self) -> f64 {
        let free = self.free_bytes();
        if free == 0 {
            return 0.0;
        }
        1.0 - self.largest_gap() as f64 / free as f64
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

impl Arena for CompactingArena {
    type Handle = ArenaPtr<u8>;

    fn capacity(&self) -> usize {
        CompactingArena::capacity(self)
    }

    fn allocate(&mut self, element_width: usize, count: usize) -> ArenaResult<ArenaPtr<u8>> {
        CompactingArena::allocate(self, element_width, count)
    }

    fn free(&mut self, handle: ArenaPtr<u8>) -> ArenaResult<()> {
        CompactingArena::free(self, handle)
    }

    fn resize(&mut self, new_capacity: usize) -> ArenaResult<()> {
        CompactingArena::resize(self, new_capacity)
    }

    fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        CompactingArena::dump(self, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(arena: &CompactingArena) -> Vec<Range<usize>> {
        arena.directory().map(|(_, info)| info.range()).collect()
    }

    #[test]
    fn test_first_fit_placement() {
        let mut arena = CompactingArena::new(64);
        let a = arena.allocate(1, 16).unwrap();
        let _b = arena.allocate(1, 16).unwrap();
        assert_eq!(ranges(&arena), vec![0..16, 16..32]);

        arena.free(a).unwrap();
        let _c = arena.allocate(1, 8).unwrap();
        assert_eq!(ranges(&arena), vec![0..8, 16..32]);

        // too big for the 8-byte hole, lands after B
        let _d = arena.allocate(1, 12).unwrap();
        assert_eq!(ranges(&arena), vec![0..8, 16..32, 32..44]);
    }

    #[test]
    fn test_exhaustion_and_empty_requests() {
        let mut arena = CompactingArena::new(32);
        let _a = arena.allocate(4, 8).unwrap();
        assert_eq!(
            arena.allocate(1, 1),
            Err(ArenaError::Exhausted { requested: 1 })
        );
        assert_eq!(arena.allocate(0, 3), Err(ArenaError::EmptyAllocation));
        assert!(matches!(
            arena.allocate(usize::MAX, usize::MAX),
            Err(ArenaError::Exhausted { .. })
        ));
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut arena = CompactingArena::new(32);
        let a = arena.allocate(1, 4).unwrap();
        let copy = a;
        arena.free(a).unwrap();
        assert_eq!(arena.free(copy), Err(ArenaError::InvalidHandle));
        assert!(!arena.is_live(&copy));
        assert_eq!(arena.get(&copy, 0), Err(ArenaError::InvalidHandle));
    }

    #[test]
    fn test_handle_from_other_arena_is_rejected() {
        let mut first = CompactingArena::new(32);
        let mut second = CompactingArena::new(32);
        let _ = second.allocate(1, 4).unwrap();
        let foreign = second.allocate(1, 4).unwrap();
        let _ = first.allocate(1, 4).unwrap();
        assert_eq!(first.free(foreign), Err(ArenaError::InvalidHandle));
    }

    #[test]
    fn test_defragment_moves_and_marks_stale() {
        let mut arena = CompactingArena::new(64);
        let a = arena.alloc::<u8>(16).unwrap();
        let mut b = arena.alloc::<u8>(16).unwrap();
        arena.bytes_mut(&b).unwrap().copy_from_slice(&[7; 16]);
        arena.free(a).unwrap();

        let report = arena.defragment();
        assert_eq!(
            report,
            DefragReport {
                blocks_moved: 1,
                bytes_moved: 16,
                free_tail: 48,
            }
        );
        assert_eq!(ranges(&arena), vec![0..16]);

        assert_eq!(arena.read(&b), Err(ArenaError::StaleHandle));
        assert!(arena.is_live(&b));
        b.reset(&arena).unwrap();
        assert_eq!(arena.bytes(&b).unwrap(), &[7; 16]);
        // old location was scrubbed
        assert!(arena.store().as_slice()[16..].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_unmoved_handles_stay_fresh() {
        let mut arena = CompactingArena::new(64);
        let a = arena.alloc::<u32>(2).unwrap();
        arena.set(&a, 1, 5u32).unwrap();
        let b = arena.alloc::<u8>(4).unwrap();
        arena.free(b).unwrap();

        assert_eq!(arena.defragment().blocks_moved, 0);
        assert_eq!(arena.get(&a, 1).unwrap(), 5);
    }

    #[test]
    fn test_insertions_do_not_retarget_handles() {
        let mut arena = CompactingArena::new(64);
        let a = arena.alloc::<u8>(8).unwrap();
        let b = arena.alloc::<u8>(8).unwrap();
        arena.set(&b, 0, 0xB0u8).unwrap();
        arena.free(a).unwrap();

        // new entry is inserted before b in the directory
        let c = arena.alloc::<u8>(4).unwrap();
        arena.set(&c, 0, 0xC0u8).unwrap();

        assert_eq!(arena.get(&b, 0).unwrap(), 0xB0);
        assert_eq!(arena.get(&c, 0).unwrap(), 0xC0);
        assert_ne!(b.block_id(), c.block_id());
    }

    #[test]
    fn test_resize_grow_preserves_data() {
        let mut arena = CompactingArena::new(32);
        let a = arena.alloc::<u8>(8).unwrap();
        let mut b = arena.alloc::<u16>(4).unwrap();
        for i in 0..4 {
            arena.set(&b, i, u16::try_from(i * 100).unwrap()).unwrap();
        }
        arena.free(a).unwrap();

        arena.resize(128).unwrap();
        assert_eq!(arena.capacity(), 128);
        assert_eq!(ranges(&arena), vec![0..8]);

        b.reset(&arena).unwrap();
        for i in 0..4 {
            assert_eq!(arena.get(&b, i).unwrap(), u16::try_from(i * 100).unwrap());
        }
    }

    #[test]
    fn test_resize_shrink_rejected_without_mutation() {
        let mut arena = CompactingArena::new(64);
        let _a = arena.alloc::<u8>(8).unwrap();
        let hole = arena.alloc::<u8>(8).unwrap();
        let b = arena.alloc::<u8>(24).unwrap();
        arena.bytes_mut(&b).unwrap().fill(3);
        arena.free(hole).unwrap();

        let before = arena.store().as_slice().to_vec();
        assert_eq!(
            arena.resize(31),
            Err(ArenaError::DoesNotFit {
                live: 32,
                capacity: 31
            })
        );
        assert_eq!(arena.capacity(), 64);
        assert_eq!(arena.store().as_slice(), before.as_slice());
        assert_eq!(ranges(&arena), vec![0..8, 16..40]);
        assert_eq!(arena.bytes(&b).unwrap(), &[3; 24]);

        // exactly the live total fits
        arena.resize(32).unwrap();
        assert_eq!(arena.free_bytes(), 0);
    }

    #[test]
    fn test_gap_statistics() {
        let mut arena = CompactingArena::new(40);
        let a = arena.alloc::<u8>(10).unwrap();
        let _b = arena.alloc::<u8>(10).unwrap();
        let c = arena.alloc::<u8>(10).unwrap();
        let _d = arena.alloc::<u8>(10).unwrap();
        assert_eq!(arena.largest_gap(), 0);
        assert!(arena.fragmentation().abs() < f64::EPSILON);

        arena.free(a).unwrap();
        arena.free(c).unwrap();
        assert_eq!(arena.free_bytes(), 20);
        assert_eq!(arena.largest_gap(), 10);
        assert!((arena.fragmentation() - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            arena.allocate(1, 20),
            Err(ArenaError::Exhausted { requested: 20 })
        );

        arena.defragment();
        assert_eq!(arena.largest_gap(), 20);
        assert!(arena.allocate(1, 20).is_ok());
    }

    #[test]
    fn test_dump_respects_columns() {
        let config = ArenaConfig::with_capacity(4).with_dump_columns(2);
        let mut arena = CompactingArena::from_config(&config).unwrap();
        let a = arena.alloc::<u8>(1).unwrap();
        arena.write(&a, 9u8).unwrap();

        let mut out = Vec::new();
        arena.dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "9 0 \n0 0 \n");
    }
}
