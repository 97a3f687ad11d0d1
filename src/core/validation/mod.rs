//! Validation engine seam
//!
//! The data handler does not evaluate constraints itself. It hands the target
//! to a [`Validator`] and only cares about the violations that come back.

pub mod validators;

pub use validators::ValidatorEngine;

use crate::core::constraint::ConstraintRef;
use crate::core::violation::ViolationList;
use anyhow::Result;
use std::sync::Arc;

/// Name of the group holding the constraints declared without an explicit group
pub const DEFAULT_GROUP: &str = "Default";

/// A validation engine for targets of type `T`
///
/// Implementations must be deterministic for identical inputs. Failed
/// constraints are reported as violations; an `Err` means the engine itself
/// could not run.
pub trait Validator<T: ?Sized> {
    /// Validate `target`
    ///
    /// - `constraints`: when `Some`, evaluate these instead of the target's declared rules
    /// - `groups`: when `Some`, only activate these validation groups
    fn validate(
        &self,
        target: &T,
        constraints: Option<&[ConstraintRef]>,
        groups: Option<&[String]>,
    ) -> Result<ViolationList>;
}

impl<T: ?Sized, V: Validator<T> + ?Sized> Validator<T> for &V {
    fn validate(
        &self,
        target: &T,
        constraints: Option<&[ConstraintRef]>,
        groups: Option<&[String]>,
    ) -> Result<ViolationList> {
        (**self).validate(target, constraints, groups)
    }
}

impl<T: ?Sized, V: Validator<T> + ?Sized> Validator<T> for Arc<V> {
    fn validate(
        &self,
        target: &T,
        constraints: Option<&[ConstraintRef]>,
        groups: Option<&[String]>,
    ) -> Result<ViolationList> {
        (**self).validate(target, constraints, groups)
    }
}
