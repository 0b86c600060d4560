//! # Emergency Flags
//!
//! Process-wide emergency indicator for safety-critical applications.
//! Independent subsystems ("nodes") raise and solve discrete fault codes;
//! the system is in emergency while any node anywhere has an unsolved code.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   raise/solve   ┌────────────────────┐
//! │ EmergencyNode├────────────────►│                    │
//! │ [bitset|cnt] │                 │  EmergencyState    │   query()
//! └──────────────┘                 │  initialized: bool ├──────────► bool
//! ┌──────────────┐   raise/solve   │  aggregate:   u64  │
//! │ EmergencyNode├────────────────►│                    │
//! └──────────────┘    destroy      └────────────────────┘
//! ```
//!
//! - [`EmergencyState`]: init guard plus atomic aggregate count of raised
//!   `(node, code)` pairs. [`EmergencyState::global`] is the process-wide one.
//! - [`EmergencyNode`]: caller-owned [`AtomicBitset`] of raised codes and a
//!   local counter, kept in lockstep with the aggregate.
//!
//! ## Usage
//!
//! ```rust
//! use emergency_flags::{EmergencyNode, EmergencyState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let state = EmergencyState::new();
//! let _ = state.class_init();
//!
//! let mut spindle = EmergencyNode::with_state(&state);
//! spindle.raise(3)?;
//! assert!(spindle.is_emergency_state());
//!
//! spindle.solve(3)?;
//! assert!(!spindle.is_emergency_state());
//! spindle.destroy();
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - **EmergencyState**: lock-free, every access is one atomic operation
//! - **EmergencyNode**: `raise`/`solve` through `&self` from any thread;
//!   `init`/`reset`/`destroy` need `&mut self`
//!
//! ## Errors
//!
//! Rejected calls never mutate anything:
//!
//! ```rust
//! use emergency_flags::{EmergencyError, EmergencyNode, EmergencyState};
//!
//! let state = EmergencyState::new();
//! let node = EmergencyNode::with_state(&state);
//! match node.raise(255) {
//!     Err(EmergencyError::OutOfRange { code, capacity }) => {
//!         eprintln!("code {code} rejected, node holds {capacity} codes");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! assert_eq!(state.aggregate(), 0);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod bitset;
pub mod error;
pub mod node;
pub mod state;

pub use bitset::AtomicBitset;
pub use error::{EmergencyError, EmergencyResult};
pub use node::{EmergencyNode, NodeSnapshot};
pub use state::EmergencyState;

pub use emergency::consts::{CAPACITY_BYTES, NUM_CODES};

use emergency::config::LogLevel;

/// Initialize tracing with `level` as the default filter.
///
/// `RUST_LOG` overrides the configured level. A second call is ignored.
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
