//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};

/// Dispatch configuration section.
///
/// Controls which error codes the dispatcher emits for failures it detects
/// itself, and whether an emitted error asks the host to stop serving.
///
/// # Example
///
/// ```
/// use pathwright_config::DispatchConfig;
///
/// let config = DispatchConfig {
///     hook_failure_code: 401,
///     ..Default::default()
/// };
/// assert_eq!(config.fallback_error_code, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Code emitted when a hook rejects the request.
    #[serde(default = "default_hook_failure_code")]
    pub hook_failure_code: u16,

    /// Message recorded on the context when a hook rejects the request.
    #[serde(default = "default_hook_failure_message")]
    pub hook_failure_message: String,

    /// Code emitted when a request fails without a recorded code.
    #[serde(default = "default_fallback_error_code")]
    pub fallback_error_code: u16,

    /// Message recorded alongside [`fallback_error_code`](Self::fallback_error_code).
    #[serde(default = "default_fallback_error_message")]
    pub fallback_error_message: String,

    /// Ask the host to halt after a resolution error, regardless of what the
    /// error handler returns.
    #[serde(default = "default_true")]
    pub halt_after_error: bool,

    /// Ask the host to halt after a hook rejection, regardless of what the
    /// error handler returns.
    #[serde(default = "default_true")]
    pub halt_after_hook_failure: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            hook_failure_code: default_hook_failure_code(),
            hook_failure_message: default_hook_failure_message(),
            fallback_error_code: default_fallback_error_code(),
            fallback_error_message: default_fallback_error_message(),
            halt_after_error: true,
            halt_after_hook_failure: true,
        }
    }
}

fn default_hook_failure_code() -> u16 {
    403
}

fn default_hook_failure_message() -> String {
    "url hook function validate error".to_string()
}

fn default_fallback_error_code() -> u16 {
    500
}

fn default_fallback_error_message() -> String {
    "server internal error".to_string()
}

fn default_true() -> bool {
    true
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (e.g. `info`, `pathwright=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,

    /// Name reported in the `service` field of every event.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
            service_name: default_service_name(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "pathwright".to_string()
}
