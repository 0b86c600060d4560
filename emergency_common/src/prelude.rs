//! Prelude module for common re-exports.
//!
//! ```rust
//! use emergency_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, EmergencyConfig, EmergencySection, SharedConfig};

// ─── Sizing ─────────────────────────────────────────────────────────
pub use crate::consts::{CAPACITY_BYTES, NUM_CODES};
