//! Build-time sizing of the emergency bitset.
//!
//! Single source of truth for the default code capacity. Nodes take the
//! capacity as a const generic parameter defaulting to [`CAPACITY_BYTES`].

use static_assertions::const_assert;

/// Default bitset size in bytes for one emergency node.
pub const CAPACITY_BYTES: usize = 8;

/// Number of distinct codes a default node can track: `[0, NUM_CODES)`.
pub const NUM_CODES: usize = CAPACITY_BYTES * 8;

/// Bits stored per bitset byte.
pub const BITS_PER_BYTE: usize = 8;

const_assert!(CAPACITY_BYTES > 0);
// The per-node counter is a `u32`.
const_assert!(NUM_CODES <= u32::MAX as usize);
