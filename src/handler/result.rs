//! Outcome of a data handler call

use crate::core::constraint::{payload_error, resolve_error_name};
use crate::core::hydration::RawInput;
use crate::core::violation::{Violation, ViolationList};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Path reported for violations that are not attached to a property
pub const GLOBAL_PATH: &str = "-";

/// Transport-ready form of a violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// Property path, or `"-"` for a global error
    pub path: String,

    /// Interpolated, human-readable message
    pub message: String,

    /// Machine-readable error name, if one could be determined
    pub error: Option<String>,

    /// Message parameters keyed by bare placeholder name
    pub parameters: IndexMap<String, Value>,
}

impl NormalizedError {
    /// Normalize a single violation
    ///
    /// The error name comes from the constraint payload's `error` entry when
    /// present, otherwise from the constraint's table for the violation code.
    pub fn from_violation(violation: &Violation) -> Self {
        let error = violation.constraint().and_then(|constraint| {
            payload_error(&**constraint)
                .or_else(|| resolve_error_name(&**constraint, violation.code()))
        });

        let parameters: IndexMap<String, Value> = violation
            .parameters()
            .map(|parameters| {
                parameters
                    .iter()
                    .map(|(key, value)| (strip_placeholder(key).to_string(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path: violation
                .property_path()
                .unwrap_or(GLOBAL_PATH)
                .to_string(),
            message: violation.message().to_string(),
            error,
            parameters,
        }
    }
}

impl NormalizedError {
    /// JSON object with the keys `path`, `message`, `error` and `parameters`
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("path".to_string(), Value::String(self.path.clone()));
        object.insert("message".to_string(), Value::String(self.message.clone()));
        object.insert(
            "error".to_string(),
            self.error.clone().map_or(Value::Null, Value::String),
        );
        object.insert(
            "parameters".to_string(),
            Value::Object(self.parameters.clone().into_iter().collect()),
        );
        Value::Object(object)
    }
}

/// Bare name of a `{{ name }}` placeholder; other keys are returned as-is
pub fn strip_placeholder(key: &str) -> &str {
    key.trim()
        .strip_prefix("{{")
        .and_then(|rest| rest.strip_suffix("}}"))
        .map(str::trim)
        .unwrap_or(key)
}

/// The validated target together with the request data and the violations found
#[derive(Debug)]
pub struct HandlerResult<T> {
    data: T,
    request_data: RawInput,
    violation_list: ViolationList,
    errors: OnceLock<Vec<NormalizedError>>,
}

impl<T> HandlerResult<T> {
    pub fn new(data: T, request_data: RawInput, violation_list: ViolationList) -> Self {
        Self {
            data,
            request_data,
            violation_list,
            errors: OnceLock::new(),
        }
    }

    /// True when validation reported no violation
    pub fn is_valid(&self) -> bool {
        self.violation_list.is_empty()
    }

    /// Normalized errors, one per violation and in the same order
    ///
    /// Built on first access and cached. A valid result never builds anything.
    pub fn errors(&self) -> &[NormalizedError] {
        if self.is_valid() {
            return &[];
        }

        self.errors.get_or_init(|| {
            self.violation_list
                .iter()
                .map(NormalizedError::from_violation)
                .collect()
        })
    }

    /// Normalized errors as a JSON array
    pub fn errors_value(&self) -> Value {
        Value::Array(self.errors().iter().map(NormalizedError::to_value).collect())
    }

    /// The payload the target was hydrated from, untouched
    pub fn request_data(&self) -> &RawInput {
        &self.request_data
    }

    pub fn violation_list(&self) -> &ViolationList {
        &self.violation_list
    }

    /// The (hydrated) target
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn into_parts(self) -> (T, RawInput, ViolationList) {
        (self.data, self.request_data, self.violation_list)
    }
}
