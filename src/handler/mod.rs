//! The data handler: hydrate, validate, normalize
//!
//! ```rust
//! use data_handler::prelude::*;
//! use serde_json::json;
//! use validator::Validate;
//!
//! #[derive(Debug, Default, Validate)]
//! pub struct Signup {
//!     #[validate(length(min = 3))]
//!     pub username: String,
//! }
//!
//! impl_hydratable!(Signup {
//!     fields: [username: String],
//! });
//!
//! let handler = DataHandler::new(ValidatorEngine);
//! let request = json!({ "username": "al" }).as_object().cloned().unwrap();
//!
//! let result = handler.handle(request, Signup::default()).unwrap();
//! assert!(!result.is_valid());
//! assert_eq!(result.errors()[0].path, "username");
//! assert_eq!(result.errors()[0].error.as_deref(), Some("LENGTH_ERROR"));
//! ```

pub mod result;

pub use result::{HandlerResult, NormalizedError};

use crate::config::{HandleOptions, Options, OptionsResolver};
use crate::core::error::DataHandlerError;
use crate::core::hydration::{RawInput, Target};
use crate::core::validation::Validator;
use std::sync::OnceLock;

/// Single entry point of the intake flow
///
/// One handler can serve any number of calls; the option schema is built on
/// first use and reused afterwards.
#[derive(Debug)]
pub struct DataHandler<V> {
    validator: V,
    options_resolver: OnceLock<OptionsResolver>,
}

impl<V> DataHandler<V> {
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            options_resolver: OnceLock::new(),
        }
    }

    /// Hydrate and validate `target` with default options
    pub fn handle<T>(
        &self,
        request_data: RawInput,
        target: T,
    ) -> Result<HandlerResult<T>, DataHandlerError>
    where
        T: Target,
        V: Validator<T>,
    {
        self.handle_with_options(request_data, target, &Options::new())
    }

    /// Hydrate and validate `target`
    ///
    /// 1. hydrate the target from `request_data` if it is hydratable
    /// 2. resolve `options` (unknown keys are rejected before validation)
    /// 3. validate with `constraints` and `validation_groups`
    /// 4. when `constraints_extra` is set, validate again with those
    ///    constraints and no groups, appending the violations
    ///
    /// Hydration, option and validator failures are returned as errors.
    /// Violations never are: they end up in the [`HandlerResult`].
    pub fn handle_with_options<T>(
        &self,
        request_data: RawInput,
        mut target: T,
        options: &Options,
    ) -> Result<HandlerResult<T>, DataHandlerError>
    where
        T: Target,
        V: Validator<T>,
    {
        if let Some(hydratable) = target.as_hydratable() {
            hydratable.hydrate(&request_data)?;
        }

        let options = self.resolve_options(options)?;

        let mut violations = self.validator.validate(
            &target,
            options.constraints.as_deref(),
            options.validation_groups.as_deref(),
        )?;

        if let Some(extra) = options.constraints_extra.as_deref() {
            let extra_violations = self.validator.validate(&target, Some(extra), None)?;
            violations.add_all(extra_violations);
        }

        tracing::debug!(
            keys = request_data.len(),
            violations = violations.len(),
            extra_pass = options.constraints_extra.is_some(),
            "Handled request data"
        );

        Ok(HandlerResult::new(target, request_data, violations))
    }

    fn resolve_options(&self, options: &Options) -> Result<HandleOptions, DataHandlerError> {
        let resolver = self.options_resolver.get_or_init(|| {
            tracing::debug!("Building handler options resolver");
            HandleOptions::resolver()
        });

        let resolved = resolver.resolve(options)?;
        Ok(HandleOptions::try_from(resolved)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraint::ConstraintRef;
    use crate::core::violation::ViolationList;
    use serde_json::Value;

    struct NoViolations;

    impl Validator<Value> for NoViolations {
        fn validate(
            &self,
            _: &Value,
            _: Option<&[ConstraintRef]>,
            _: Option<&[String]>,
        ) -> anyhow::Result<ViolationList> {
            Ok(ViolationList::new())
        }
    }

    #[test]
    fn test_resolver_is_built_once() {
        let handler = DataHandler::new(NoViolations);
        assert!(handler.options_resolver.get().is_none());

        handler.handle(RawInput::new(), Value::Null).unwrap();
        let first = handler.options_resolver.get().unwrap() as *const OptionsResolver;

        handler.handle(RawInput::new(), Value::Null).unwrap();
        let second = handler.options_resolver.get().unwrap() as *const OptionsResolver;

        assert_eq!(first, second);
    }

    #[test]
    fn test_validator_failure_propagates() {
        struct Offline;

        impl Validator<Value> for Offline {
            fn validate(
                &self,
                _: &Value,
                _: Option<&[ConstraintRef]>,
                _: Option<&[String]>,
            ) -> anyhow::Result<ViolationList> {
                anyhow::bail!("engine offline")
            }
        }

        let err = DataHandler::new(Offline)
            .handle(RawInput::new(), Value::Null)
            .unwrap_err();

        assert!(matches!(err, DataHandlerError::Validation(_)));
        assert_eq!(err.to_string(), "engine offline");
    }
}
