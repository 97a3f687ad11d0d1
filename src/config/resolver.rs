//! Generic option resolver

use super::{OptionValue, Options};
use crate::core::error::ConfigError;
use indexmap::IndexMap;

/// Resolves options against a schema of defined keys and their defaults
///
/// Resolution is stateless: the resolver only holds the schema, so one
/// instance can be shared by any number of calls.
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    defaults: IndexMap<String, OptionValue>,
}

impl OptionsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an option and its default value
    pub fn set_default(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.defaults.contains_key(key)
    }

    /// Defined option names, in definition order
    pub fn defined_options(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// Merge `options` over the defaults
    ///
    /// Fails on the first key that is not defined. The input is left untouched.
    pub fn resolve(&self, options: &Options) -> Result<Options, ConfigError> {
        if let Some((key, _)) = options.iter().find(|(key, _)| !self.is_defined(key)) {
            return Err(ConfigError::undefined_option(key, self.defined_options()));
        }

        let mut resolved = Options::new();
        for (key, default) in &self.defaults {
            let value = options.get(key).unwrap_or(default).clone();
            resolved.insert(key.clone(), value);
        }

        Ok(resolved)
    }
}
