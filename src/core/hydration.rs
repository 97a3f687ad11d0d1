//! Populating typed targets from untyped request data
//!
//! A hydratable type declares, once, which public attribute names it accepts
//! and how each one is written: either directly onto a field or through a
//! setter. The declaration is a [`HydrationMap`], usually generated by the
//! [`impl_hydratable!`](crate::impl_hydratable) macro.
//!
//! Each key of the payload is resolved in a fixed order:
//!
//! 1. a field whose public name is exactly the key
//! 2. a field whose public name is the camelCase form of the key
//! 3. a setter named `set` + the capitalized camelCase key
//!
//! Anything else is rejected with [`HydrationError::UnknownAttribute`].

use crate::core::case::{camel_case, setter_name};
use crate::core::error::HydrationError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Untyped request payload, in the order the caller supplied it
pub type RawInput = Map<String, Value>;

/// Writes one value onto a target
///
/// The value is deserialized into the declared type of the field or setter
/// argument; a shape mismatch is reported as a `serde_json::Error`.
pub type Assign<T> = fn(&mut T, Value) -> Result<(), serde_json::Error>;

/// How a payload key was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Exact public field name
    Field,
    /// camelCase form of the key matched a public field name
    CamelCaseField,
    /// Public setter
    Setter,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Field => write!(f, "field"),
            Resolution::CamelCaseField => write!(f, "camel_case_field"),
            Resolution::Setter => write!(f, "setter"),
        }
    }
}

/// Public fields and setters of a hydratable type
pub struct HydrationMap<T> {
    fields: IndexMap<Cow<'static, str>, Assign<T>>,
    setters: IndexMap<String, Assign<T>>,
}

impl<T> HydrationMap<T> {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            setters: IndexMap::new(),
        }
    }

    /// Register a public field under its public name
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, assign: Assign<T>) -> Self {
        self.fields.insert(name.into(), assign);
        self
    }

    /// Register a setter method
    ///
    /// The setter is keyed by the camelCase form of the method name, so
    /// `set_title` answers to `setTitle`.
    pub fn setter(mut self, method: &str, assign: Assign<T>) -> Self {
        self.setters.insert(camel_case(method).into_owned(), assign);
        self
    }

    /// Public field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|name| name.as_ref())
    }

    /// Setter names (camelCase), in declaration order
    pub fn setter_names(&self) -> impl Iterator<Item = &str> {
        self.setters.keys().map(String::as_str)
    }

    /// Find how a payload key is written onto the target
    pub fn resolve(&self, key: &str) -> Option<(Resolution, Assign<T>)> {
        if let Some(assign) = self.fields.get(key) {
            return Some((Resolution::Field, *assign));
        }

        let camel_key = camel_case(key);
        if camel_key != key {
            if let Some(assign) = self.fields.get(camel_key.as_ref()) {
                return Some((Resolution::CamelCaseField, *assign));
            }
        }

        self.setters
            .get(setter_name(&camel_key).as_str())
            .map(|assign| (Resolution::Setter, *assign))
    }
}

impl<T> Default for HydrationMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HydrationMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HydrationMap")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("setters", &self.setter_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Types that describe their public attributes with a [`HydrationMap`]
///
/// The map is built once per type and shared by all of its instances.
pub trait Hydrate: Sized + 'static {
    fn hydration_map() -> &'static HydrationMap<Self>;
}

/// The hydration capability: accepts an untyped payload
pub trait Hydratable {
    fn hydrate(&mut self, data: &RawInput) -> Result<(), HydrationError>;
}

impl<T: Hydrate> Hydratable for T {
    fn hydrate(&mut self, data: &RawInput) -> Result<(), HydrationError> {
        hydrate(self, data)
    }
}

/// Anything the data handler can validate
///
/// Targets that support hydration return themselves from
/// [`Target::as_hydratable`]; every other target keeps the default.
pub trait Target {
    fn as_hydratable(&mut self) -> Option<&mut dyn Hydratable> {
        None
    }
}

impl Target for Value {}

impl Target for Map<String, Value> {}

/// Write every entry of `data` onto `target`
///
/// Entries are applied in payload order. The first key that cannot be
/// resolved or assigned aborts hydration; entries before it stay applied.
pub fn hydrate<T: Hydrate>(target: &mut T, data: &RawInput) -> Result<(), HydrationError> {
    if data.is_empty() {
        return Ok(());
    }

    let map = T::hydration_map();

    for (key, value) in data {
        let (resolution, assign) =
            map.resolve(key)
                .ok_or_else(|| HydrationError::UnknownAttribute { key: key.clone() })?;

        tracing::trace!(key = %key, resolution = %resolution, "Hydrating attribute");

        assign(target, value.clone()).map_err(|source| HydrationError::InvalidAttributeValue {
            key: key.clone(),
            source,
        })?;
    }

    Ok(())
}
