//! Error types for emergency flag operations

use thiserror::Error;

/// Errors returned by the emergency engine.
///
/// Both variants are non-fatal. A rejected call never changes node or
/// aggregate state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyError {
    /// Code is outside `[0, capacity)`
    #[error("Emergency code {code} out of range (capacity {capacity})")]
    OutOfRange {
        /// Rejected code
        code: usize,
        /// Number of codes the node can hold
        capacity: usize,
    },

    /// Global state was already initialized by an earlier `class_init`
    #[error("Emergency state already initialized")]
    AlreadyInitialized,
}

/// Result type for emergency operations
pub type EmergencyResult<T> = Result<T, EmergencyError>;
