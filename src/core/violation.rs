//! Violations reported by a validator

use crate::core::constraint::ConstraintRef;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::ops::Index;

/// Message parameters, keyed by placeholder (e.g. `"{{ limit }}"`)
pub type Parameters = IndexMap<String, Value>;

/// One failed constraint evaluation
#[derive(Debug, Clone)]
pub struct Violation {
    message: String,
    property_path: Option<String>,
    code: Option<String>,
    parameters: Option<Parameters>,
    constraint: Option<ConstraintRef>,
    invalid_value: Option<Value>,
}

impl Violation {
    /// Create a global violation carrying an already interpolated message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            property_path: None,
            code: None,
            parameters: None,
            constraint: None,
            invalid_value: None,
        }
    }

    /// Attach the violation to a property path
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_constraint(mut self, constraint: ConstraintRef) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Add a message parameter; the key is the placeholder as it appears in the template
    pub fn with_parameter(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters
            .get_or_insert_with(Parameters::new)
            .insert(placeholder.into(), value.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_invalid_value(mut self, value: impl Into<Value>) -> Self {
        self.invalid_value = Some(value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Property path, `None` for a global violation
    pub fn property_path(&self) -> Option<&str> {
        self.property_path.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    pub fn constraint(&self) -> Option<&ConstraintRef> {
        self.constraint.as_ref()
    }

    pub fn invalid_value(&self) -> Option<&Value> {
        self.invalid_value.as_ref()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property_path {
            Some(path) => write!(f, "{}: {}", path, self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(code) = &self.code {
            write!(f, " (code {})", code)?;
        }
        Ok(())
    }
}

/// Ordered list of violations produced by one validation call
#[derive(Debug, Clone, Default)]
pub struct ViolationList {
    violations: Vec<Violation>,
}

impl ViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append every violation of `other`, keeping both orders
    pub fn add_all(&mut self, other: ViolationList) {
        self.violations.extend(other.violations);
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Violation> {
        self.violations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl Index<usize> for ViolationList {
    type Output = Violation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.violations[index]
    }
}

impl From<Vec<Violation>> for ViolationList {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl FromIterator<Violation> for ViolationList {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraint::{Constraint, Rule};

    #[test]
    fn test_violation_defaults_to_global() {
        let v = Violation::new("Global error");
        assert_eq!(v.message(), "Global error");
        assert!(v.property_path().is_none());
        assert!(v.code().is_none());
        assert!(v.parameters().is_none());
        assert!(v.constraint().is_none());
    }

    #[test]
    fn test_violation_builder() {
        let v = Violation::new("Too short")
            .at("title")
            .with_code("9ff3fdc4")
            .with_parameter("{{ limit }}", 3)
            .with_invalid_value("ab")
            .with_constraint(Rule::new("Length").into_ref());

        assert_eq!(v.property_path(), Some("title"));
        assert_eq!(v.code(), Some("9ff3fdc4"));
        assert_eq!(v.parameters().unwrap()["{{ limit }}"], 3);
        assert_eq!(v.invalid_value().unwrap(), "ab");
        assert_eq!(v.constraint().unwrap().name(), "Length");
    }

    #[test]
    fn test_add_all_appends_in_order() {
        let mut first: ViolationList = vec![Violation::new("a"), Violation::new("b")].into();
        let second: ViolationList = vec![Violation::new("c")].into();

        first.add_all(second);

        let messages: Vec<&str> = first.iter().map(Violation::message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display() {
        let list: ViolationList = vec![
            Violation::new("Global error"),
            Violation::new("Test error").at("test").with_code("ERR"),
        ]
        .into();

        assert_eq!(list.to_string(), "Global error\ntest: Test error (code ERR)");
    }
}
