//! Configuration loading traits and types.
//!
//! Every process embedding the emergency engine reads one TOML file. The
//! `[emergency]` section can only *confirm* the compiled bitset capacity;
//! sizing is a build decision and is never changed at runtime.
//!
//! # Usage
//!
//! ```rust,no_run
//! use emergency_common::config::{ConfigError, ConfigLoader, EmergencyConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = EmergencyConfig::load(Path::new("emergency.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::CAPACITY_BYTES;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, every raise/solve transition.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages (orphaned contributions, counter underflow).
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared across processes.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "spindle-monitor"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_capacity_bytes() -> usize {
    CAPACITY_BYTES
}

/// `[emergency]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmergencySection {
    /// Expected bitset size in bytes. Must equal the compiled `CAPACITY_BYTES`.
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: usize,
}

impl Default for EmergencySection {
    fn default() -> Self {
        Self {
            capacity_bytes: CAPACITY_BYTES,
        }
    }
}

/// Complete configuration file of a process hosting emergency nodes.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "spindle-monitor"
///
/// [emergency]
/// capacity_bytes = 8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Common fields.
    pub shared: SharedConfig,

    /// Emergency engine settings.
    #[serde(default)]
    pub emergency: EmergencySection,
}

impl EmergencyConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - `capacity_bytes` is zero
    /// - `capacity_bytes` differs from the compiled `CAPACITY_BYTES`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let capacity = self.emergency.capacity_bytes;
        if capacity == 0 {
            return Err(ConfigError::ValidationError(
                "capacity_bytes must be greater than zero".to_string(),
            ));
        }
        if capacity != CAPACITY_BYTES {
            return Err(ConfigError::ValidationError(format!(
                "capacity_bytes = {capacity} does not match compiled capacity {CAPACITY_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
///
/// Semantic validation is left to the caller (`validate()` on the loaded type).
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from an in-memory TOML string.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(name: &str) -> SharedConfig {
        SharedConfig {
            log_level: LogLevel::Info,
            service_name: name.to_string(),
        }
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn log_level_filter_strings_match_serde_names() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }

        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let src = format!("level = \"{}\"", level.as_filter());
            let parsed: Wrapper = toml::from_str(&src).unwrap();
            assert_eq!(parsed.level, level);
        }
    }

    #[test]
    fn empty_service_name_rejected() {
        let result = shared("").validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn emergency_section_defaults_to_compiled_capacity() {
        let cfg = EmergencyConfig::parse("[shared]\nservice_name = \"cell-1\"\n").unwrap();
        assert_eq!(cfg.emergency.capacity_bytes, CAPACITY_BYTES);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = EmergencyConfig {
            shared: shared("cell-1"),
            emergency: EmergencySection { capacity_bytes: 0 },
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn mismatched_capacity_rejected() {
        let cfg = EmergencyConfig {
            shared: shared("cell-1"),
            emergency: EmergencySection {
                capacity_bytes: CAPACITY_BYTES + 1,
            },
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn unknown_emergency_field_rejected() {
        let src = r#"
[shared]
service_name = "cell-1"

[emergency]
capacity_bytes = 8
priority = "high"
"#;
        assert!(matches!(
            EmergencyConfig::parse(src),
            Err(ConfigError::ParseError(_))
        ));
    }
}
