//! Constraints as seen by the data handler
//!
//! What a constraint checks is up to the validator. The handler only needs a
//! constraint's name, its payload (which may override the public error code)
//! and its table of canonical error names.

use crate::core::violation::ViolationList;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Free-form data attached to a constraint
pub type Payload = Map<String, Value>;

/// Payload key holding an explicit error code override
pub const PAYLOAD_ERROR_KEY: &str = "error";

/// Shared handle to a constraint
pub type ConstraintRef = Arc<dyn Constraint>;

/// A validation rule known to the validator
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Constraint type name (e.g. `"NotBlank"`)
    fn name(&self) -> &str;

    /// Optional payload attached to this constraint instance
    fn payload(&self) -> Option<&Payload> {
        None
    }

    /// Canonical error name for a raw violation code, if this constraint type maps it
    fn error_name(&self, code: &str) -> Option<String>;

    /// Concrete constraint, for engines that know how to evaluate it
    ///
    /// Descriptive constraints such as [`Rule`] keep the default.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Resolve the canonical error name for a violation code
///
/// Returns `None` when there is no code or the constraint does not map it.
pub fn resolve_error_name(constraint: &dyn Constraint, code: Option<&str>) -> Option<String> {
    code.and_then(|code| constraint.error_name(code))
}

/// Error code override carried in a constraint payload
///
/// A `null` entry counts as absent. Non-string values are rendered as JSON text.
pub fn payload_error(constraint: &dyn Constraint) -> Option<String> {
    match constraint.payload()?.get(PAYLOAD_ERROR_KEY)? {
        Value::Null => None,
        Value::String(code) => Some(code.clone()),
        other => Some(other.to_string()),
    }
}

/// Serializable constraint description
///
/// This is what option documents deserialize constraint lists into.
///
/// ```
/// use data_handler::core::constraint::{Constraint, Rule};
///
/// let rule = Rule::new("NotBlank")
///     .with_error_name("c1051bb4", "IS_BLANK_ERROR")
///     .with_payload_entry("error", "TITLE_REQUIRED");
///
/// assert_eq!(rule.error_name("c1051bb4").as_deref(), Some("IS_BLANK_ERROR"));
/// assert_eq!(rule.error_name("unknown"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Constraint type name
    pub name: String,

    /// Raw code → canonical error name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub error_names: IndexMap<String, String>,

    /// Optional payload (an `error` entry overrides the public error code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Map a raw code to a canonical error name
    pub fn with_error_name(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.error_names.insert(code.into(), name.into());
        self
    }

    /// Add an entry to the payload, creating it if needed
    pub fn with_payload_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload
            .get_or_insert_with(Payload::new)
            .insert(key.into(), value.into());
        self
    }

    /// Wrap into a shared [`ConstraintRef`]
    pub fn into_ref(self) -> ConstraintRef {
        Arc::new(self)
    }
}

impl Constraint for Rule {
    fn name(&self) -> &str {
        &self.name
    }

    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    fn error_name(&self, code: &str) -> Option<String> {
        self.error_names.get(code).cloned()
    }
}

type Check<T> = dyn Fn(&T) -> ViolationList + Send + Sync;

/// Constraint evaluated by a closure over the typed target
///
/// This is how explicit `constraints` and `constraints_extra` reach
/// [`ValidatorEngine`](crate::core::validation::ValidatorEngine). Violations
/// returned by the closure without a constraint get this one attached.
///
/// ```
/// use data_handler::prelude::*;
///
/// struct Signup {
///     email: String,
/// }
///
/// let unique = FnConstraint::new("UniqueEmail", |signup: &Signup| {
///     if signup.email == "taken@example.com" {
///         vec![Violation::new("Email already taken").at("email").with_code("7d0bd2c1")].into()
///     } else {
///         ViolationList::new()
///     }
/// })
/// .with_error_name("7d0bd2c1", "NOT_UNIQUE_ERROR");
///
/// let taken = Signup { email: "taken@example.com".to_string() };
/// assert_eq!(unique.check(&taken).len(), 1);
/// ```
pub struct FnConstraint<T> {
    name: String,
    check: Box<Check<T>>,
    error_names: IndexMap<String, String>,
    payload: Option<Payload>,
}

impl<T: 'static> FnConstraint<T> {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&T) -> ViolationList + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
            error_names: IndexMap::new(),
            payload: None,
        }
    }

    /// Map a raw code to a canonical error name
    pub fn with_error_name(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.error_names.insert(code.into(), name.into());
        self
    }

    /// Add an entry to the payload, creating it if needed
    pub fn with_payload_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload
            .get_or_insert_with(Payload::new)
            .insert(key.into(), value.into());
        self
    }

    /// Run the closure against `target`
    pub fn check(&self, target: &T) -> ViolationList {
        (self.check)(target)
    }

    pub fn into_ref(self) -> ConstraintRef {
        Arc::new(self)
    }
}

impl<T> fmt::Debug for FnConstraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConstraint")
            .field("name", &self.name)
            .field("error_names", &self.error_names)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Constraint for FnConstraint<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    fn error_name(&self, code: &str) -> Option<String> {
        self.error_names.get(code).cloned()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}
