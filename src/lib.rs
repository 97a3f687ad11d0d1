//! # Data Handler
//!
//! Request data intake for APIs: take an untyped key/value payload, hydrate a
//! typed target from it, validate the target and report the outcome in a
//! stable, serializable error format.
//!
//! ## Features
//!
//! - **Convention-based hydration**: payload keys map onto fields, camelCase
//!   fields or setters, declared once per type with [`impl_hydratable!`]
//! - **Pluggable validation**: any [`Validator`](core::validation::Validator)
//!   works; [`ValidatorEngine`](core::validation::ValidatorEngine) runs
//!   `validator` derive rules
//! - **Option resolution**: `constraints`, `validation_groups` and
//!   `constraints_extra`, unknown options rejected up front
//! - **Normalized errors**: `{path, message, error, parameters}` per violation,
//!   built lazily and only when needed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use data_handler::prelude::*;
//!
//! #[derive(Debug, Default, Validate)]
//! pub struct Article {
//!     #[validate(length(min = 1))]
//!     pub title: String,
//!     pub published_at: Option<String>,
//! }
//!
//! impl_hydratable!(Article {
//!     fields: [
//!         title: String,
//!         published_at: Option<String>,
//!     ],
//! });
//!
//! let handler = DataHandler::new(ValidatorEngine);
//! let result = handler.handle(request_data, Article::default())?;
//!
//! if !result.is_valid() {
//!     return Err(unprocessable(result.errors_value()));
//! }
//! let article = result.into_data();
//! ```

pub mod config;
pub mod core;
pub mod handler;
mod macros;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        constraint::{Constraint, ConstraintRef, FnConstraint, Payload, Rule},
        error::{ConfigError, DataHandlerError, HydrationError},
        hydration::{Hydratable, Hydrate, HydrationMap, RawInput, Target},
        validation::{Validator, ValidatorEngine},
        violation::{Parameters, Violation, ViolationList},
    };

    // === Config ===
    pub use crate::config::{HandleOptions, OptionValue, Options, OptionsResolver};

    // === Handler ===
    pub use crate::handler::{DataHandler, HandlerResult, NormalizedError};

    // === Macros ===
    pub use crate::{impl_hydratable, impl_target};
}
