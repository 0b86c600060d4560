//! Emergency node: one caller-owned set of raised codes.
//!
//! A node feeds its raised codes into the [`EmergencyState`] it is bound
//! to. Each 0→1 bit transition adds exactly one unit to both the local
//! counter and the aggregate, each 1→0 transition removes one.
//!
//! ## Ordering
//!
//! `raise` counts *before* publishing the bit and takes the count back if
//! the bit was already set. A set bit therefore always has its unit in the
//! aggregate, so a concurrent `solve` of that bit can never drive the
//! aggregate (or the local counter) below zero.
//!
//! ## Re-initialization hazard
//!
//! [`EmergencyNode::init`] zeroes the node without touching the aggregate.
//! Codes raised before the re-init stay counted with no bit left to solve
//! them. Use [`EmergencyNode::reset`] to release them first.

use std::sync::atomic::{AtomicU32, Ordering};

use emergency::consts::CAPACITY_BYTES;
use static_assertions::assert_impl_all;

use crate::bitset::AtomicBitset;
use crate::error::{EmergencyError, EmergencyResult};
use crate::state::EmergencyState;

/// Byte-exact copy of a node's local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSnapshot<const BYTES: usize> {
    /// Raw bitset bytes.
    pub bits: [u8; BYTES],
    /// Local raised-code counter.
    pub local_count: u32,
}

/// Fixed-capacity set of raised emergency codes bound to one aggregate.
///
/// `raise`/`solve` take `&self` and may run from several threads at once.
/// `init`, `reset` and `destroy` need exclusive access.
#[derive(Debug)]
pub struct EmergencyNode<'s, const BYTES: usize = CAPACITY_BYTES> {
    state: &'s EmergencyState,
    bits: AtomicBitset<BYTES>,
    local_count: AtomicU32,
}

impl EmergencyNode<'static> {
    /// Zeroed node bound to the process-wide state.
    ///
    /// Call [`EmergencyState::class_init`] on the global state first; a later
    /// first init discards codes this node has already raised.
    pub fn new() -> Self {
        Self::bind(EmergencyState::global())
    }
}

impl Default for EmergencyNode<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> EmergencyNode<'s> {
    /// Zeroed node of default capacity bound to `state`.
    ///
    /// `state` should already have passed [`EmergencyState::class_init`].
    pub fn with_state(state: &'s EmergencyState) -> Self {
        Self::bind(state)
    }
}

impl<'s, const BYTES: usize> EmergencyNode<'s, BYTES> {
    /// Number of valid codes: `[0, CAPACITY)`.
    pub const CAPACITY: usize = AtomicBitset::<BYTES>::CAPACITY;

    /// Zeroed node of any capacity bound to `state`.
    pub const fn bind(state: &'s EmergencyState) -> Self {
        Self {
            state,
            bits: AtomicBitset::new(),
            local_count: AtomicU32::new(0),
        }
    }

    #[inline]
    fn check(code: usize) -> EmergencyResult<()> {
        if code < Self::CAPACITY {
            Ok(())
        } else {
            Err(EmergencyError::OutOfRange {
                code,
                capacity: Self::CAPACITY,
            })
        }
    }

    /// Zero the node. The aggregate is NOT adjusted.
    pub fn init(&mut self) {
        let orphaned = *self.local_count.get_mut();
        if orphaned > 0 {
            tracing::warn!(
                orphaned,
                "Node re-initialized with raised codes; contributions stay in the aggregate"
            );
        }
        self.bits.reset();
        *self.local_count.get_mut() = 0;
    }

    /// Raise `code`. Raising an already raised code is a no-op.
    ///
    /// # Errors
    /// `OutOfRange` if `code >= CAPACITY`; nothing is modified.
    pub fn raise(&self, code: usize) -> EmergencyResult<()> {
        Self::check(code)?;

        self.local_count.fetch_add(1, Ordering::AcqRel);
        self.state.increment();

        if self.bits.set(code) {
            tracing::trace!(code, "Emergency raised");
        } else {
            self.local_count.fetch_sub(1, Ordering::AcqRel);
            self.state.decrement();
        }
        Ok(())
    }

    /// Solve `code`. Solving a clear code is a no-op.
    ///
    /// # Errors
    /// `OutOfRange` if `code >= CAPACITY`; nothing is modified.
    pub fn solve(&self, code: usize) -> EmergencyResult<()> {
        Self::check(code)?;

        if self.bits.clear(code) {
            self.local_count.fetch_sub(1, Ordering::AcqRel);
            self.state.decrement();
            tracing::trace!(code, "Emergency solved");
        }
        Ok(())
    }

    /// System-wide emergency status. The node's own codes are not consulted.
    #[inline]
    pub fn is_emergency_state(&self) -> bool {
        self.state.query()
    }

    /// Release this node's whole contribution in one step, then zero it.
    pub fn destroy(&mut self) {
        let released = self.release_all();
        tracing::debug!(released, "Emergency node destroyed");
    }

    /// Like [`init`](Self::init), but releases outstanding codes first so the
    /// aggregate stays in sync.
    pub fn reset(&mut self) {
        let released = self.release_all();
        if released > 0 {
            tracing::debug!(released, "Emergency node reset");
        }
    }

    fn release_all(&mut self) -> u32 {
        let count = *self.local_count.get_mut();
        self.state.release(u64::from(count));
        self.bits.reset();
        *self.local_count.get_mut() = 0;
        count
    }

    /// Whether `code` is raised on this node.
    ///
    /// # Errors
    /// `OutOfRange` if `code >= CAPACITY`.
    pub fn is_raised(&self, code: usize) -> EmergencyResult<bool> {
        Self::check(code)?;
        Ok(self.bits.test(code))
    }

    /// Number of codes raised on this node.
    #[inline]
    pub fn raised_count(&self) -> u32 {
        self.local_count.load(Ordering::Acquire)
    }

    /// Raised codes in ascending order.
    pub fn raised_codes(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_set()
    }

    /// Number of valid codes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// The aggregate this node reports into.
    #[inline]
    pub fn state(&self) -> &'s EmergencyState {
        self.state
    }

    /// Copy of the local bitset bytes and counter.
    pub fn snapshot(&self) -> NodeSnapshot<BYTES> {
        NodeSnapshot {
            bits: self.bits.snapshot(),
            local_count: self.raised_count(),
        }
    }
}

assert_impl_all!(EmergencyNode<'static>: Send, Sync);

impl<const BYTES: usize> Drop for EmergencyNode<'_, BYTES> {
    fn drop(&mut self) {
        self.release_all();
    }
}
