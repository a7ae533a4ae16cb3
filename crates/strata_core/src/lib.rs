//! # STRATA Core
//!
//! Memory arenas that serve sub-allocations from a single pre-allocated
//! buffer instead of calling the heap per object.
//!
//! - [`FixedArena`]: block sizes live in headers inside the buffer. Fixed
//!   footprint, linear first-fit scans, every resize discards all data.
//! - [`CompactingArena`]: block ranges live in a sorted side table. Resizing
//!   keeps data, [`CompactingArena::defragment`] closes gaps in place, and
//!   [`ArenaPtr`] handles survive moves once they are reset.
//!
//! ## Architecture Rules
//!
//! 1. **Single owner** - arenas are not thread-safe; mutation takes `&mut self`
//! 2. **No silent recovery** - exhaustion is reported, never auto-resized
//! 3. **Unused bytes are zero** - freed and never-used regions read as 0
//!
//! ## Example
//!
//! ```rust
//! use strata_core::{ArenaError, CompactingArena};
//!
//! let mut arena = CompactingArena::new(32);
//! let a = arena.alloc::<u64>(2)?;
//! let mut b = arena.alloc::<u64>(2)?;
//! arena.write(&b, 42u64)?;
//!
//! assert!(matches!(arena.alloc::<u64>(1), Err(ArenaError::Exhausted { .. })));
//!
//! arena.free(a)?;
//! arena.resize(16)?;
//! b.reset(&arena)?;
//! assert_eq!(arena.read(&b)?, 42);
//! # Ok::<(), ArenaError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;

pub use config::ArenaConfig;
pub use error::{ArenaError, ArenaResult};
pub use memory::{
    Arena, ArenaPtr, BackingStore, BlockId, BlockInfo, CompactingArena, DefragReport, FixedAddr,
    FixedArena, HEADER_WIDTH,
};
