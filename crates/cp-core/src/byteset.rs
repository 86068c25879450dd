//! Fixed-size set of byte values.

use std::fmt;

/// A 256-bit membership set over `u8`.
///
/// `Copy`, so handing a modified set to a child search node is a 32-byte copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet {
    words: [u64; 4],
}

impl ByteSet {
    pub const fn new() -> Self {
        Self { words: [0; 4] }
    }

    /// Every byte value.
    pub const fn full() -> Self {
        Self { words: [u64::MAX; 4] }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::new();
        set.extend(bytes);
        set
    }

    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.words[(b >> 6) as usize] & (1u64 << (b & 63)) != 0
    }

    /// Returns true if `b` was not already present.
    #[inline]
    pub fn insert(&mut self, b: u8) -> bool {
        let present = self.contains(b);
        self.words[(b >> 6) as usize] |= 1u64 << (b & 63);
        !present
    }

    /// Returns true if `b` was present.
    #[inline]
    pub fn remove(&mut self, b: u8) -> bool {
        let present = self.contains(b);
        self.words[(b >> 6) as usize] &= !(1u64 << (b & 63));
        present
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.insert(b);
        }
    }

    pub fn union(&self, other: &ByteSet) -> ByteSet {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w |= o;
        }
        ByteSet { words }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&b| self.contains(b))
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|b| std::ascii::escape_default(b).to_string()))
            .finish()
    }
}
