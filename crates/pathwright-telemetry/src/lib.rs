//! Observability for Pathwright.
//!
//! - **Logging**: a `tracing-subscriber` registry with JSON or pretty output
//! - **Metrics**: dispatch counters emitted through the `metrics` facade
//!
//! The dispatcher emits `tracing` events and `metrics` counters whether or not
//! this crate's initialisers are called; they only decide where those go.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathwright_config::ConfigLoader;
//! use pathwright_telemetry::init_telemetry;
//!
//! let config = ConfigLoader::new().with_env_prefix("PATHWRIGHT").load()?;
//! init_telemetry(&config.logging)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{describe_metrics, DispatchOutcome};

use pathwright_config::LoggingConfig;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging from the `[logging]` configuration section and
/// describes the dispatch counters to whatever recorder is installed.
///
/// # Errors
///
/// Returns `TelemetryError` if logging fails to initialize.
pub fn init_telemetry(config: &LoggingConfig) -> TelemetryResult<()> {
    init_logging(&LogConfig::from(config))?;
    describe_metrics();
    Ok(())
}
