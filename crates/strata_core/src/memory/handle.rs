//! # Stable Handles
//!
//! [`ArenaPtr`] is the compacting arena's answer to a raw pointer. It binds to
//! a block by identity ([`BlockId`]) rather than by address, remembers the
//! block start it last observed, and stores its position as an element index
//! relative to that start.
//!
//! Moves are not tracked automatically. After [`CompactingArena::defragment`]
//! or [`CompactingArena::resize`] a handle whose block moved reports
//! [`ArenaError::StaleHandle`](crate::ArenaError::StaleHandle) until it is
//! [`reset`](ArenaPtr::reset).
//!
//! [`CompactingArena::defragment`]: super::CompactingArena::defragment
//! [`CompactingArena::resize`]: super::CompactingArena::resize

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::compacting::{BlockId, CompactingArena};
use crate::error::ArenaResult;

/// Element width used for indexing. Zero-sized types count as one byte.
#[inline]
pub(crate) fn width_of<T>() -> usize {
    mem::size_of::<T>().max(1)
}

/// A handle into a [`CompactingArena`] block, viewed as elements of `T`.
///
/// Handles are plain values: copying one does not copy the block, and
/// freeing the block through any copy leaves every copy dangling.
pub struct ArenaPtr<T> {
    /// The directory entry this handle is bound to.
    block: BlockId,
    /// Block start observed at bind or reset time.
    base: usize,
    /// Element index relative to the block start.
    position: usize,
    /// Marker for T.
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ArenaPtr<T> {
    pub(crate) fn bind(block: BlockId, base: usize) -> Self {
        Self {
            block,
            base,
            position: 0,
            _phantom: PhantomData,
        }
    }

    /// Returns the identity of the bound block.
    #[inline]
    #[must_use]
    pub const fn block_id(&self) -> BlockId {
        self.block
    }

    /// Returns the block start this handle last synchronized with.
    #[inline]
    pub(crate) const fn base(&self) -> usize {
        self.base
    }

    /// Returns the current element index within the block.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Moves the handle to element `position`. Not bounds-checked.
    #[inline]
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Moves forward by `n` elements. Not bounds-checked.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.position = self.position.wrapping_add(n);
    }

    /// Moves back by `n` elements. Not bounds-checked.
    #[inline]
    pub fn retreat(&mut self, n: usize) {
        self.position = self.position.wrapping_sub(n);
    }

    /// Resynchronizes with the block's current location.
    ///
    /// Rebinds to the block's current start and moves back to element 0.
    /// Required after any operation that relocated the block.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidHandle`](crate::ArenaError::InvalidHandle)
    /// if the block has been freed.
    pub fn reset(&mut self, arena: &CompactingArena) -> ArenaResult<()> {
        self.base = arena.current_start(self.block)?;
        self.position = 0;
        Ok(())
    }

    /// Reinterprets the same bytes as elements of `U`.
    ///
    /// The byte offset of the current position is kept, rounded down to a
    /// whole `U`. The caller is responsible for width compatibility.
    #[must_use]
    pub fn cast<U>(self) -> ArenaPtr<U> {
        let byte_offset = self.position.saturating_mul(width_of::<T>());
        ArenaPtr {
            block: self.block,
            base: self.base,
            position: byte_offset / width_of::<U>(),
            _phantom: PhantomData,
        }
    }
}

impl<T> Clone for ArenaPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaPtr<T> {}

impl<T> PartialEq for ArenaPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.base == other.base && self.position == other.position
    }
}

impl<T> Eq for ArenaPtr<T> {}

impl<T> fmt::Debug for ArenaPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaPtr")
            .field("block", &self.block)
            .field("base", &self.base)
            .field("position", &self.position)
            .field("element", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Add<usize> for ArenaPtr<T> {
    type Output = Self;

    fn add(mut self, rhs: usize) -> Self {
        self.advance(rhs);
        self
    }
}

impl<T> Sub<usize> for ArenaPtr<T> {
    type Output = Self;

    fn sub(mut self, rhs: usize) -> Self {
        self.retreat(rhs);
        self
    }
}

impl<T> AddAssign<usize> for ArenaPtr<T> {
    fn add_assign(&mut self, rhs: usize) {
        self.advance(rhs);
    }
}

impl<T> SubAssign<usize> for ArenaPtr<T> {
    fn sub_assign(&mut self, rhs: usize) {
        self.retreat(rhs);
    }
}
