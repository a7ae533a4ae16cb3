//! # Backing Store
//!
//! The single contiguous byte buffer an arena carves its blocks from.

use std::io::{self, Write};
use std::mem;
use std::ops::Range;

/// Width in bytes of a size word stored inside the buffer.
pub const WORD_WIDTH: usize = mem::size_of::<usize>();

/// A fixed-capacity, zero-initialized byte buffer.
///
/// Owned exclusively by one arena and replaced wholesale on resize. Arenas
/// keep every byte outside a live block at zero, so a dump shows exactly
/// which regions are in use.
pub struct BackingStore {
    /// The bytes.
    bytes: Box<[u8]>,
}

impl BackingStore {
    /// Creates a zeroed store of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
        }
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the whole buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the bytes in `range`, or `None` if it leaves the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, range: Range<usize>) -> Option<&[u8]> {
        self.bytes.get(range)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, range: Range<usize>) -> Option<&mut [u8]> {
        self.bytes.get_mut(range)
    }

    /// Reads a native-endian size word at `offset`.
    ///
    /// Returns `None` when the word would run past the end of the buffer.
    #[inline]
    pub(crate) fn read_word(&self, offset: usize) -> Option<usize> {
        let end = offset.checked_add(WORD_WIDTH)?;
        let raw = self.bytes.get(offset..end)?;
        let mut word = [0u8; WORD_WIDTH];
        word.copy_from_slice(raw);
        Some(usize::from_ne_bytes(word))
    }

    /// Writes a native-endian size word at `offset`.
    ///
    /// The caller has already checked that the word fits.
    #[inline]
    pub(crate) fn write_word(&mut self, offset: usize, value: usize) {
        self.bytes[offset..offset + WORD_WIDTH].copy_from_slice(&value.to_ne_bytes());
    }

    /// Zero-fills `range`.
    #[inline]
    pub(crate) fn zero(&mut self, range: Range<usize>) {
        self.bytes[range].fill(0);
    }

    /// Copies `src` to `dest`, which may overlap.
    #[inline]
    pub(crate) fn copy_within(&mut self, src: Range<usize>, dest: usize) {
        self.bytes.copy_within(src, dest);
    }

    /// Copies `src` of another store to `dest` in this one.
    #[inline]
    pub(crate) fn copy_from(&mut self, other: &Self, src: Range<usize>, dest: usize) {
        let len = src.len();
        self.bytes[dest..dest + len].copy_from_slice(&other.bytes[src]);
    }

    /// Writes every byte in order as space-separated decimals.
    ///
    /// With `columns > 0` a line break follows every `columns` bytes; the
    /// dump always ends with a newline.
    pub(crate) fn dump<W: Write>(&self, sink: &mut W, columns: usize) -> io::Result<()> {
        for (i, byte) in self.bytes.iter().enumerate() {
            write!(sink, "{byte} ")?;
            if columns > 0 && (i + 1) % columns == 0 && i + 1 != self.bytes.len() {
                writeln!(sink)?;
            }
        }
        writeln!(sink)
    }
}

impl std::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackingStore")
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_zeroed() {
        let store = BackingStore::new(32);
        assert_eq!(store.capacity(), 32);
        assert!(store.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_word_roundtrip_and_bounds() {
        let mut store = BackingStore::new(WORD_WIDTH * 2);
        store.write_word(WORD_WIDTH, 0xBEEF);
        assert_eq!(store.read_word(WORD_WIDTH), Some(0xBEEF));
        assert_eq!(store.read_word(0), Some(0));
        assert_eq!(store.read_word(WORD_WIDTH + 1), None);
        assert_eq!(store.read_word(usize::MAX), None);
    }

    #[test]
    fn test_copy_within_overlapping() {
        let mut store = BackingStore::new(8);
        store.get_mut(2..6).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        store.copy_within(2..6, 0);
        assert_eq!(&store.as_slice()[..6], &[1, 2, 3, 4, 3, 4]);
        store.zero(4..8);
        assert_eq!(store.as_slice(), &[1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_dump_layout() {
        let mut store = BackingStore::new(4);
        store.get_mut(0..1).unwrap()[0] = 7;

        let mut out = Vec::new();
        store.dump(&mut out, 0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7 0 0 0 \n");

        let mut out = Vec::new();
        store.dump(&mut out, 2).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7 0 \n0 0 \n");
    }
}
