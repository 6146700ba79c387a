//! Main configuration types.
//!
//! This module provides the top-level [`PathwrightConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DispatchConfig, LogFormat, LoggingConfig};

/// Range accepted for any configured status code.
const STATUS_CODES: std::ops::RangeInclusive<u16> = 100..=599;

/// Complete Pathwright configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use pathwright_config::PathwrightConfig;
///
/// let config = PathwrightConfig::default();
/// assert_eq!(config.dispatch.hook_failure_code, 403);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PathwrightConfig {
    /// Dispatch behaviour.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PathwrightConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use pathwright_config::{DispatchConfig, PathwrightConfig};
    ///
    /// let config = PathwrightConfig::builder()
    ///     .dispatch(DispatchConfig {
    ///         halt_after_error: false,
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert!(!config.dispatch.halt_after_error);
    /// ```
    #[must_use]
    pub fn builder() -> PathwrightConfigBuilder {
        PathwrightConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A configured status code is outside `100..=599`
    /// - The log level is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_code("dispatch.hook_failure_code", self.dispatch.hook_failure_code)?;
        check_code(
            "dispatch.fallback_error_code",
            self.dispatch.fallback_error_code,
        )?;

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored debug logs with source locations. Errors never ask the
    /// host to halt, so a single bad request does not stop a dev server.
    ///
    /// # Example
    ///
    /// ```
    /// use pathwright_config::PathwrightConfig;
    ///
    /// let config = PathwrightConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config.dispatch.halt_after_error = false;
        config.dispatch.halt_after_hook_failure = false;

        config
    }

    /// Create a production configuration preset.
    ///
    /// # Example
    ///
    /// ```
    /// use pathwright_config::PathwrightConfig;
    ///
    /// let config = PathwrightConfig::production();
    /// assert_eq!(config.logging.format, pathwright_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }
}

fn check_code(field: &'static str, code: u16) -> Result<(), ConfigError> {
    if STATUS_CODES.contains(&code) {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("status code {code} is outside 100..=599"),
        ))
    }
}

/// Builder for [`PathwrightConfig`].
#[derive(Debug, Default)]
pub struct PathwrightConfigBuilder {
    dispatch: Option<DispatchConfig>,
    logging: Option<LoggingConfig>,
}

impl PathwrightConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dispatch configuration.
    #[must_use]
    pub fn dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> PathwrightConfig {
        PathwrightConfig {
            dispatch: self.dispatch.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<PathwrightConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PathwrightConfig::default();
        assert_eq!(config.dispatch.fallback_error_code, 500);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_keeps_unset_sections_default() {
        let config = PathwrightConfig::builder()
            .logging(LoggingConfig {
                level: "warn".to_string(),
                ..Default::default()
            })
            .build();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.dispatch, DispatchConfig::default());
    }

    #[test]
    fn test_validate_hook_failure_code_range() {
        let result = PathwrightConfig::builder()
            .dispatch(DispatchConfig {
                hook_failure_code: 42,
                ..Default::default()
            })
            .build_validated();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("dispatch.hook_failure_code"));
    }

    #[test]
    fn test_validate_fallback_code_range() {
        let config = PathwrightConfig::builder()
            .dispatch(DispatchConfig {
                fallback_error_code: 600,
                ..Default::default()
            })
            .build();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dispatch.fallback_error_code"));
    }

    #[test]
    fn test_validate_empty_log_level() {
        let config = PathwrightConfig::builder()
            .logging(LoggingConfig {
                level: "  ".to_string(),
                ..Default::default()
            })
            .build();

        assert!(config.validate().unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn test_development_preset() {
        let config = PathwrightConfig::development();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.include_location);
        assert!(!config.dispatch.halt_after_error);
        assert!(!config.dispatch.halt_after_hook_failure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_preset() {
        let config = PathwrightConfig::production();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.ansi_enabled);
        assert!(config.dispatch.halt_after_error);
    }
}
