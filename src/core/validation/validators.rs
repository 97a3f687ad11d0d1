//! Validation engine backed by the `validator` crate
//!
//! Targets declare their rules with `#[derive(Validate)]`. The engine runs
//! them and turns `ValidationErrors` into a flat [`ViolationList`]:
//!
//! - nested struct errors get dotted paths (`address.city`)
//! - list entries get indexed paths (`items[2].name`)
//! - struct-level (`__all__`) errors are global and carry no path

use super::{DEFAULT_GROUP, Validator};
use crate::core::constraint::{ConstraintRef, FnConstraint, Rule};
use crate::core::violation::{Parameters, Violation, ViolationList};
use anyhow::{Result, bail};
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Field key used by `validator` for struct-level errors
const STRUCT_LEVEL_KEY: &str = "__all__";

/// [`Validator`] for any target implementing [`validator::Validate`]
///
/// The `validator` crate has no validation groups: every declared rule
/// belongs to the `Default` group.
///
/// Explicit constraints replace the declared rules. Each one must be a
/// [`FnConstraint`] over the target type; an empty list checks nothing.
/// Descriptive constraints such as [`Rule`] carry no behaviour and are
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorEngine;

impl ValidatorEngine {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Validate + 'static> Validator<T> for ValidatorEngine {
    fn validate(
        &self,
        target: &T,
        constraints: Option<&[ConstraintRef]>,
        groups: Option<&[String]>,
    ) -> Result<ViolationList> {
        if let Some(constraints) = constraints {
            return evaluate_constraints(target, constraints);
        }

        if let Some(groups) = groups {
            if !groups.iter().any(|group| group == DEFAULT_GROUP) {
                tracing::debug!(?groups, "No requested group declares rules, skipping validation");
                return Ok(ViolationList::new());
            }
        }

        match target.validate() {
            Ok(()) => Ok(ViolationList::new()),
            Err(errors) => Ok(violations_from_errors(&errors)),
        }
    }
}

fn evaluate_constraints<T: 'static>(
    target: &T,
    constraints: &[ConstraintRef],
) -> Result<ViolationList> {
    let mut violations = ViolationList::new();

    for constraint in constraints {
        let Some(check) = constraint
            .as_any()
            .and_then(|any| any.downcast_ref::<FnConstraint<T>>())
        else {
            bail!(
                "ValidatorEngine cannot evaluate constraint \"{}\"; use a FnConstraint over the target type",
                constraint.name()
            );
        };

        let found = check.check(target);
        tracing::trace!(constraint = constraint.name(), violations = found.len(), "Evaluated constraint");

        violations.add_all(
            found
                .into_iter()
                .map(|violation| {
                    if violation.constraint().is_some() {
                        violation
                    } else {
                        violation.with_constraint(Arc::clone(constraint))
                    }
                })
                .collect(),
        );
    }

    Ok(violations)
}

/// Flatten `validator` errors into violations, ordered by field name
pub fn violations_from_errors(errors: &ValidationErrors) -> ViolationList {
    let mut violations = ViolationList::new();
    collect(errors, None, &mut violations);
    violations
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, violations: &mut ViolationList) {
    let mut entries: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, kind) in entries {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let path = if field == STRUCT_LEVEL_KEY {
                    prefix.map(str::to_string)
                } else {
                    Some(join_path(prefix, &field))
                };
                for error in field_errors {
                    violations.add(violation_from_error(error, path.as_deref()));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect(nested, Some(&join_path(prefix, &field)), violations);
            }
            ValidationErrorsKind::List(entries) => {
                let base = join_path(prefix, &field);
                for (index, nested) in entries {
                    collect(nested, Some(&format!("{}[{}]", base, index)), violations);
                }
            }
        }
    }
}

fn join_path(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, field),
        None => field.to_string(),
    }
}

fn violation_from_error(error: &ValidationError, path: Option<&str>) -> Violation {
    let code = error.code.to_string();
    let message = error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| code.clone());

    let mut params: Vec<(String, &serde_json::Value)> = error
        .params
        .iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    let parameters: Parameters = params
        .into_iter()
        .map(|(name, value)| (format!("{{{{ {} }}}}", name), value.clone()))
        .collect();

    let constraint = Rule::new(code.clone())
        .with_error_name(code.clone(), format!("{}_ERROR", code.to_uppercase()))
        .into_ref();

    let mut violation = Violation::new(message)
        .with_code(code)
        .with_constraint(constraint);

    if !parameters.is_empty() {
        violation = violation.with_parameters(parameters);
    }
    if let Some(value) = error.params.get("value") {
        violation = violation.with_invalid_value(value.clone());
    }
    if let Some(path) = path {
        violation = violation.at(path);
    }

    violation
}
