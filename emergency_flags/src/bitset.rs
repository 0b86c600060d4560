//! Fixed-capacity atomic bitset.
//!
//! ## Layout
//!
//! `bytes[i]` holds codes `(i*8)..((i+1)*8)`, LSB first:
//! bit 0 of `bytes[0]` = code 0, bit 7 of `bytes[0]` = code 7,
//! bit 0 of `bytes[1]` = code 8, etc.
//!
//! ## Atomicity
//!
//! `set`/`clear` are single `fetch_or`/`fetch_and` operations on one byte.
//! Their return value tells the caller whether *this* call performed the
//! transition, so concurrent edits of any bits never lose an update and
//! each 0↔1 flip is reported to exactly one caller.

use std::sync::atomic::{AtomicU8, Ordering};

use emergency::consts::BITS_PER_BYTE;

/// Bitset of `BYTES * 8` bits backed by atomic bytes.
#[derive(Debug)]
pub struct AtomicBitset<const BYTES: usize> {
    bytes: [AtomicU8; BYTES],
}

#[inline]
const fn locate(index: usize) -> (usize, u8) {
    (index / BITS_PER_BYTE, 1u8 << (index % BITS_PER_BYTE))
}

impl<const BYTES: usize> AtomicBitset<BYTES> {
    /// Number of addressable bits.
    pub const CAPACITY: usize = BYTES * BITS_PER_BYTE;

    /// Create an all-clear bitset.
    pub const fn new() -> Self {
        Self {
            bytes: [const { AtomicU8::new(0) }; BYTES],
        }
    }

    /// Number of addressable bits.
    #[inline]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// Read one bit.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        debug_assert!(index < Self::CAPACITY, "bit {index} out of range");
        let (byte, mask) = locate(index);
        self.bytes[byte].load(Ordering::Acquire) & mask != 0
    }

    /// Set one bit. Returns `true` if it was clear before this call.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn set(&self, index: usize) -> bool {
        debug_assert!(index < Self::CAPACITY, "bit {index} out of range");
        let (byte, mask) = locate(index);
        self.bytes[byte].fetch_or(mask, Ordering::AcqRel) & mask == 0
    }

    /// Clear one bit. Returns `true` if it was set before this call.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    #[inline]
    pub fn clear(&self, index: usize) -> bool {
        debug_assert!(index < Self::CAPACITY, "bit {index} out of range");
        let (byte, mask) = locate(index);
        self.bytes[byte].fetch_and(!mask, Ordering::AcqRel) & mask != 0
    }

    /// Population count.
    pub fn count_ones(&self) -> u32 {
        self.bytes
            .iter()
            .map(|b| b.load(Ordering::Acquire).count_ones())
            .sum()
    }

    /// Indices of set bits in ascending order.
    ///
    /// Each byte is loaded once; the iterator is not a consistent snapshot
    /// while other threads mutate the set.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.bytes.iter().enumerate().flat_map(|(i, b)| {
            let value = b.load(Ordering::Acquire);
            (0..BITS_PER_BYTE)
                .filter(move |bit| value & (1u8 << bit) != 0)
                .map(move |bit| i * BITS_PER_BYTE + bit)
        })
    }

    /// Copy of the raw bytes.
    pub fn snapshot(&self) -> [u8; BYTES] {
        std::array::from_fn(|i| self.bytes[i].load(Ordering::Acquire))
    }

    /// Clear every bit. Exclusive access, no atomics needed.
    pub fn reset(&mut self) {
        for byte in &mut self.bytes {
            *byte.get_mut() = 0;
        }
    }
}

impl<const BYTES: usize> Default for AtomicBitset<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}
