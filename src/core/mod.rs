//! Core module containing the building blocks of the intake flow

pub mod case;
pub mod constraint;
pub mod error;
pub mod hydration;
pub mod validation;
pub mod violation;

pub use constraint::{Constraint, ConstraintRef, FnConstraint, Rule};
pub use error::{ConfigError, DataHandlerError, HydrationError};
pub use hydration::{Hydratable, Hydrate, HydrationMap, RawInput, Target};
pub use validation::{Validator, ValidatorEngine};
pub use violation::{Violation, ViolationList};
