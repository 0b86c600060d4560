//! Global emergency state (aggregate counter).
//!
//! One [`EmergencyState`] holds the count of currently raised
//! `(node, code)` pairs summed over every node bound to it. The system is
//! in emergency while that count is non-zero.
//!
//! ## Lifecycle
//!
//! `Uninit → Init` through [`EmergencyState::class_init`], exactly once,
//! never reverted. A second call reports
//! [`EmergencyError::AlreadyInitialized`] and leaves the counter alone.
//!
//! ## Atomicity
//!
//! Every read and mutation is a single atomic operation. Decrements
//! saturate at zero so the aggregate can never be observed negative.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::error::{EmergencyError, EmergencyResult};

/// Process-wide instance, reached through [`EmergencyState::global`].
static GLOBAL_STATE: EmergencyState = EmergencyState::new();

/// Initialization guard plus aggregate counter.
#[derive(Debug)]
pub struct EmergencyState {
    initialized: AtomicBool,
    aggregate: AtomicU64,
}

impl EmergencyState {
    /// Create an uninitialized state with a zero aggregate.
    ///
    /// Only needed for isolated aggregates (tests, simulations). Production
    /// nodes bind to [`EmergencyState::global`].
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            aggregate: AtomicU64::new(0),
        }
    }

    /// The process-wide emergency state.
    #[inline]
    pub fn global() -> &'static EmergencyState {
        &GLOBAL_STATE
    }

    /// One-shot initialization.
    ///
    /// Exactly one concurrent caller gets `Ok(())` and resets the aggregate
    /// to zero; every other call returns `AlreadyInitialized` without
    /// touching anything.
    ///
    /// # Precondition
    /// Call this before binding nodes. Codes raised earlier are discarded
    /// from the aggregate while their bits stay set, so solving them later
    /// consumes units that belong to other nodes.
    pub fn class_init(&self) -> EmergencyResult<()> {
        match self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                let discarded = self.aggregate.swap(0, Ordering::AcqRel);
                if discarded > 0 {
                    tracing::warn!(
                        discarded,
                        "Emergency state initialized after codes were raised; contributions discarded"
                    );
                }
                tracing::debug!("Emergency state initialized");
                Ok(())
            }
            Err(_) => Err(EmergencyError::AlreadyInitialized),
        }
    }

    /// Whether `class_init` has succeeded once.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// `true` while any bound node has a raised code.
    #[inline]
    pub fn query(&self) -> bool {
        self.aggregate() > 0
    }

    /// Raw aggregate count (diagnostics).
    #[inline]
    pub fn aggregate(&self) -> u64 {
        self.aggregate.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn increment(&self) {
        self.aggregate.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    pub(crate) fn decrement(&self) {
        self.release(1);
    }

    /// Subtract `count` in a single atomic step, saturating at zero.
    pub(crate) fn release(&self, count: u64) {
        if count == 0 {
            return;
        }
        let result = self
            .aggregate
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(count))
            });
        // fetch_update with a closure that always returns Some cannot fail.
        if let Ok(previous) = result
            && previous < count
        {
            tracing::warn!(
                previous,
                released = count,
                "Emergency aggregate underflow clamped to zero"
            );
        }
    }
}

impl Default for EmergencyState {
    fn default() -> Self {
        Self::new()
    }
}
