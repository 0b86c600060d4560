//! Emergency Common Library
//!
//! Shared constants and configuration loading utilities for the emergency
//! flag workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Build-time bitset sizing
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! emergency = { package = "emergency_common", path = "../emergency_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use emergency_common::consts::{CAPACITY_BYTES, NUM_CODES};
//! use emergency_common::config::{ConfigLoader, EmergencyConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
