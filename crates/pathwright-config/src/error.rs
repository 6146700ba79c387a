//! Errors raised while loading or validating a router configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a [`PathwrightConfig`](crate::PathwrightConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {path}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The format is neither TOML nor JSON.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Malformed TOML, or TOML that does not fit the schema.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or JSON that does not fit the schema.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("bad environment override {var}: {reason}")]
    EnvOverride {
        /// Variable name, prefix included.
        var: String,
        /// What was expected.
        reason: &'static str,
    },

    /// A loaded value is out of range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the field (`dispatch.hook_failure_code`).
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn env_override(var: &str, reason: &'static str) -> Self {
        Self::EnvOverride {
            var: var.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_path() {
        let err = ConfigError::NotFound {
            path: "/etc/pathwright/router.toml".into(),
        };
        assert_eq!(
            err.to_string(),
            "configuration file not found: /etc/pathwright/router.toml"
        );
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;

        let err = ConfigError::Read {
            path: "router.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_env_override_message() {
        let err = ConfigError::env_override("PATHWRIGHT__DISPATCH__HALT_AFTER_ERROR", "expected boolean");
        assert_eq!(
            err.to_string(),
            "bad environment override PATHWRIGHT__DISPATCH__HALT_AFTER_ERROR: expected boolean"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("dispatch.hook_failure_code", "42 is not an HTTP status code");
        assert!(err.to_string().starts_with("invalid value for dispatch.hook_failure_code"));
    }
}
