//! Handler options and their resolution
//!
//! Options are an untyped mapping, like the request data itself. They can be
//! built in code or loaded from a JSON value or a YAML document:
//!
//! ```yaml
//! validation_groups: [Default, registration]
//! constraints_extra:
//!   - name: UniqueEmail
//!     error_names: { 7d0bd2c1: NOT_UNIQUE_ERROR }
//! ```
//!
//! An [`OptionsResolver`] merges them with the defaults of a schema and
//! rejects keys the schema does not define.

mod resolver;

pub use resolver::OptionsResolver;

use crate::core::constraint::{ConstraintRef, Rule};
use crate::core::error::ConfigError;
use indexmap::IndexMap;
use serde_json::Value;

/// Option key: constraints replacing the target's declared ones
pub const CONSTRAINTS: &str = "constraints";

/// Option key: validation groups to activate
pub const VALIDATION_GROUPS: &str = "validation_groups";

/// Option key: constraints evaluated in a second, merged validation pass
pub const CONSTRAINTS_EXTRA: &str = "constraints_extra";

/// A single option value
#[derive(Debug, Clone)]
pub enum OptionValue {
    /// Explicitly unset
    Null,
    /// A list of constraints
    Constraints(Vec<ConstraintRef>),
    /// A list of validation group names
    Groups(Vec<String>),
    /// Any other value, kept as JSON
    Json(Value),
}

impl OptionValue {
    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null | OptionValue::Json(Value::Null))
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Constraints(_) => "constraint[]",
            OptionValue::Groups(_) => "string[]",
            OptionValue::Json(Value::Null) => "null",
            OptionValue::Json(Value::Bool(_)) => "bool",
            OptionValue::Json(Value::Number(_)) => "number",
            OptionValue::Json(Value::String(_)) => "string",
            OptionValue::Json(Value::Array(_)) => "array",
            OptionValue::Json(Value::Object(_)) => "object",
        }
    }
}

impl From<Vec<ConstraintRef>> for OptionValue {
    fn from(constraints: Vec<ConstraintRef>) -> Self {
        OptionValue::Constraints(constraints)
    }
}

impl From<Vec<Rule>> for OptionValue {
    fn from(rules: Vec<Rule>) -> Self {
        OptionValue::Constraints(rules.into_iter().map(Rule::into_ref).collect())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(groups: Vec<String>) -> Self {
        OptionValue::Groups(groups)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(groups: Vec<&str>) -> Self {
        OptionValue::Groups(groups.into_iter().map(str::to_string).collect())
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Json(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Json(Value::Bool(value))
    }
}

/// Untyped handler options
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build options from a JSON object
    ///
    /// `constraints` and `constraints_extra` are read as lists of [`Rule`],
    /// `validation_groups` as a list of strings. Other keys are kept as plain
    /// JSON so the resolver can judge them.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::Parse {
                message: "options must be a mapping".to_string(),
            });
        };

        let mut options = Options::new();
        for (key, value) in map {
            let option = match (key.as_str(), value) {
                (_, Value::Null) => OptionValue::Null,
                (CONSTRAINTS | CONSTRAINTS_EXTRA, value @ Value::Array(_)) => {
                    let rules: Vec<Rule> = serde_json::from_value(value)?;
                    rules.into()
                }
                (VALIDATION_GROUPS, value @ Value::Array(_)) => {
                    let groups: Vec<String> = serde_json::from_value(value)?;
                    groups.into()
                }
                (_, value) => OptionValue::Json(value),
            };
            options.values.insert(key, option);
        }

        Ok(options)
    }

    /// Load options from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }
}

/// Typed view of resolved handler options
#[derive(Debug, Clone, Default)]
pub struct HandleOptions {
    pub constraints: Option<Vec<ConstraintRef>>,
    pub validation_groups: Option<Vec<String>>,
    pub constraints_extra: Option<Vec<ConstraintRef>>,
}

impl HandleOptions {
    /// Schema of the options understood by the data handler, all defaulting to null
    pub fn resolver() -> OptionsResolver {
        OptionsResolver::new()
            .set_default(VALIDATION_GROUPS, OptionValue::Null)
            .set_default(CONSTRAINTS, OptionValue::Null)
            .set_default(CONSTRAINTS_EXTRA, OptionValue::Null)
    }
}

impl TryFrom<Options> for HandleOptions {
    type Error = ConfigError;

    fn try_from(mut options: Options) -> Result<Self, Self::Error> {
        Ok(Self {
            constraints: take_constraints(&mut options, CONSTRAINTS)?,
            validation_groups: take_groups(&mut options, VALIDATION_GROUPS)?,
            constraints_extra: take_constraints(&mut options, CONSTRAINTS_EXTRA)?,
        })
    }
}

fn take_constraints(
    options: &mut Options,
    key: &str,
) -> Result<Option<Vec<ConstraintRef>>, ConfigError> {
    match options.values.shift_remove(key) {
        None => Ok(None),
        Some(value) if value.is_null() => Ok(None),
        Some(OptionValue::Constraints(constraints)) => Ok(Some(constraints)),
        Some(other) => Err(invalid_type(key, "constraint[]", &other)),
    }
}

fn take_groups(options: &mut Options, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
    match options.values.shift_remove(key) {
        None => Ok(None),
        Some(value) if value.is_null() => Ok(None),
        Some(OptionValue::Groups(groups)) => Ok(Some(groups)),
        Some(other) => Err(invalid_type(key, "string[]", &other)),
    }
}

fn invalid_type(key: &str, expected: &'static str, actual: &OptionValue) -> ConfigError {
    ConfigError::InvalidOptionType {
        option: key.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
