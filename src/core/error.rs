//! Typed error handling for the data handler
//!
//! Callers can match on the failure they care about instead of inspecting a
//! generic error message.
//!
//! # Error Categories
//!
//! - [`HydrationError`]: a payload key could not be written onto the target
//! - [`ConfigError`]: handler options could not be parsed or resolved
//! - [`DataHandlerError`]: everything [`DataHandler::handle`] can fail with
//!
//! Validation failures are never errors: once the validator ran, the outcome
//! is carried by [`HandlerResult`] as data.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_handler::prelude::*;
//!
//! match handler.handle(request_data, Article::default()) {
//!     Ok(result) if result.is_valid() => save(result.into_data()),
//!     Ok(result) => respond_unprocessable(result.errors_value()),
//!     Err(DataHandlerError::Hydration(HydrationError::UnknownAttribute { key })) => {
//!         respond_bad_request(format!("unexpected field {key}"))
//!     }
//!     Err(e) => respond_internal(e),
//! }
//! ```
//!
//! [`DataHandler::handle`]: crate::handler::DataHandler::handle
//! [`HandlerResult`]: crate::handler::HandlerResult

use thiserror::Error;

/// Everything a call to the data handler can fail with
#[derive(Debug, Error)]
pub enum DataHandlerError {
    /// Hydrating the target from the request data failed
    #[error(transparent)]
    Hydration(#[from] HydrationError),

    /// The handler options were invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The validator itself failed (as opposed to reporting violations)
    #[error(transparent)]
    Validation(#[from] anyhow::Error),
}

impl DataHandlerError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DataHandlerError::Hydration(e) => e.error_code(),
            DataHandlerError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            DataHandlerError::Validation(_) => "VALIDATOR_FAILURE",
        }
    }
}

// =============================================================================
// Hydration Errors
// =============================================================================

/// Errors raised while writing request data onto a target
#[derive(Debug, Error)]
pub enum HydrationError {
    /// No field, camelCase field or setter matches the key
    #[error("Invalid attribute provided \"{key}\"")]
    UnknownAttribute { key: String },

    /// The key matched, but its value does not fit the declared type
    #[error("Invalid value provided for attribute \"{key}\": {source}")]
    InvalidAttributeValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HydrationError {
    /// The payload key the error is about
    pub fn key(&self) -> &str {
        match self {
            HydrationError::UnknownAttribute { key } => key,
            HydrationError::InvalidAttributeValue { key, .. } => key,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            HydrationError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            HydrationError::InvalidAttributeValue { .. } => "INVALID_ATTRIBUTE_VALUE",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to handler options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The option is not part of the resolver schema
    #[error("The option \"{option}\" does not exist. Defined options are: {defined}.")]
    UndefinedOption { option: String, defined: String },

    /// A known option holds a value of the wrong shape
    #[error("The option \"{option}\" is expected to be of type \"{expected}\", but is of type \"{actual}\".")]
    InvalidOptionType {
        option: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The options document could not be parsed
    #[error("Failed to parse options: {message}")]
    Parse { message: String },
}

impl ConfigError {
    /// Build an [`ConfigError::UndefinedOption`] listing the defined option names
    pub fn undefined_option<'a>(
        option: impl Into<String>,
        defined: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let defined = defined
            .into_iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ");

        ConfigError::UndefinedOption {
            option: option.into(),
            defined,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_display_names_key() {
        let err = HydrationError::UnknownAttribute {
            key: "test".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid attribute provided \"test\"");
        assert_eq!(err.key(), "test");
    }

    #[test]
    fn test_invalid_attribute_value_keeps_source() {
        let source = serde_json::from_value::<u32>(serde_json::json!("nope")).unwrap_err();
        let err = HydrationError::InvalidAttributeValue {
            key: "count".to_string(),
            source,
        };
        assert!(err.to_string().contains("\"count\""));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.error_code(), "INVALID_ATTRIBUTE_VALUE");
    }

    #[test]
    fn test_undefined_option_lists_defined_options() {
        let err = ConfigError::undefined_option("invalid", ["constraints", "validation_groups"]);
        assert_eq!(
            err.to_string(),
            "The option \"invalid\" does not exist. Defined options are: \"constraints\", \"validation_groups\"."
        );
    }

    #[test]
    fn test_data_handler_error_conversion() {
        let err: DataHandlerError = HydrationError::UnknownAttribute {
            key: "x".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "UNKNOWN_ATTRIBUTE");
        // Hydration errors are surfaced unchanged
        assert_eq!(err.to_string(), "Invalid attribute provided \"x\"");

        let err: DataHandlerError = ConfigError::undefined_option("x", ["a"]).into();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert!(matches!(
            err,
            DataHandlerError::InvalidConfiguration(ConfigError::UndefinedOption { .. })
        ));
    }

    #[test]
    fn test_validator_failure_is_transparent() {
        let err: DataHandlerError = anyhow::anyhow!("engine offline").into();
        assert_eq!(err.to_string(), "engine offline");
        assert_eq!(err.error_code(), "VALIDATOR_FAILURE");
    }
}
