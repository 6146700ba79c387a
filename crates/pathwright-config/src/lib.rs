//! Typed configuration system for Pathwright.
//!
//! This crate provides strongly-typed configuration for the dispatcher with
//! support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`PathwrightConfig`] holds two sections:
//!
//! - [`DispatchConfig`] - error codes and halt policy used by the dispatcher
//! - [`LoggingConfig`] - log level, format and output options
//!
//! # Example
//!
//! ```no_run
//! use pathwright_config::ConfigLoader;
//!
//! # fn main() -> Result<(), pathwright_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("pathwright.toml")?
//!     .with_env_prefix("PATHWRIGHT")
//!     .load()?;
//!
//! println!("hook rejections answer {}", config.dispatch.hook_failure_code);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [dispatch]
//! hook_failure_code = 403
//! hook_failure_message = "url hook function validate error"
//! fallback_error_code = 500
//! fallback_error_message = "server internal error"
//! halt_after_error = true
//! halt_after_hook_failure = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with variables named `PREFIX__SECTION__KEY`:
//!
//! - `PATHWRIGHT__DISPATCH__HOOK_FAILURE_CODE=401`
//! - `PATHWRIGHT__DISPATCH__HALT_AFTER_ERROR=false`
//! - `PATHWRIGHT__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_toml_document() {
        let toml = r#"
            [dispatch]
            hook_failure_code = 401
            hook_failure_message = "denied"
            fallback_error_code = 503
            fallback_error_message = "unavailable"
            halt_after_error = false
            halt_after_hook_failure = true

            [logging]
            enabled = true
            level = "pathwright=debug,info"
            format = "pretty"
            ansi_enabled = true
            include_location = true
            service_name = "gateway"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.dispatch.hook_failure_code, 401);
        assert_eq!(config.dispatch.hook_failure_message, "denied");
        assert_eq!(config.dispatch.fallback_error_code, 503);
        assert!(!config.dispatch.halt_after_error);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.service_name, "gateway");
    }

    #[test]
    fn test_config_serializes_back_to_toml() {
        let config = PathwrightConfig::development();
        let text = toml::to_string(&config).unwrap();
        let parsed: PathwrightConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
