//! Integration tests for request data hydration
//!
//! These tests verify that:
//! - Exact field names are assigned without transformation
//! - snake_case keys fall back to camelCase fields
//! - Setters are used when no field matches
//! - Unknown keys are rejected with the offending key named

use data_handler::prelude::*;
use serde_json::{Value, json};

fn payload(value: Value) -> RawInput {
    value.as_object().cloned().expect("payload must be an object")
}

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Default)]
struct SingleField {
    test: Option<String>,
}

impl_hydratable!(SingleField {
    fields: [test: Option<String>],
});

#[derive(Debug, Default)]
struct PublicFields {
    title: Option<String>,
    description: Option<String>,
}

impl_hydratable!(PublicFields {
    fields: [
        title: Option<String>,
        description: Option<String>,
    ],
});

#[derive(Debug, Default)]
struct WithSetters {
    title: Option<String>,
    description: Option<String>,
    setter_calls: usize,
}

impl WithSetters {
    fn set_title(&mut self, title: String) {
        self.title = Some(title);
        self.setter_calls += 1;
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_description(&mut self, description: String) {
        self.description = Some(description);
        self.setter_calls += 1;
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl_hydratable!(WithSetters {
    fields: [],
    setters: [
        set_title(String),
        set_description(String),
    ],
});

#[derive(Debug, Default)]
struct CamelCased {
    camel_case: Option<String>,
}

impl_hydratable!(CamelCased {
    fields: [camel_case as "camelCase": Option<String>],
});

#[derive(Debug, Default)]
struct FieldAndSetter {
    published_at: Option<String>,
    setter_used: bool,
}

impl FieldAndSetter {
    fn set_published_at(&mut self, published_at: String) {
        self.published_at = Some(published_at);
        self.setter_used = true;
    }
}

impl_hydratable!(FieldAndSetter {
    fields: [published_at as "publishedAt": Option<String>],
    setters: [set_published_at(String)],
});

#[derive(Debug, Default)]
struct Typed {
    count: u32,
    tags: Vec<String>,
    metadata: Value,
}

impl_hydratable!(Typed {
    fields: [
        count: u32,
        tags: Vec<String>,
        metadata: Value,
    ],
});

// =============================================================================
// Hydration Tests
// =============================================================================

#[test]
fn test_hydrate_empty_data() {
    let mut obj = SingleField::default();

    obj.hydrate(&RawInput::new()).unwrap();

    assert!(obj.test.is_none());
}

#[test]
fn test_hydrate_properties() {
    let mut obj = PublicFields::default();

    obj.hydrate(&payload(json!({
        "title": "example",
        "description": "test"
    })))
    .unwrap();

    assert_eq!(obj.title.as_deref(), Some("example"));
    assert_eq!(obj.description.as_deref(), Some("test"));
}

#[test]
fn test_hydrate_setters() {
    let mut obj = WithSetters::default();

    obj.hydrate(&payload(json!({
        "title": "example",
        "description": "test"
    })))
    .unwrap();

    assert_eq!(obj.title(), Some("example"));
    assert_eq!(obj.description(), Some("test"));
    assert_eq!(obj.setter_calls, 2);
}

#[test]
fn test_convert_to_camel_case() {
    let mut obj = CamelCased::default();

    obj.hydrate(&payload(json!({ "camel_case": "test" }))).unwrap();

    assert_eq!(obj.camel_case.as_deref(), Some("test"));
}

#[test]
fn test_exact_public_name_still_matches() {
    let mut obj = CamelCased::default();

    obj.hydrate(&payload(json!({ "camelCase": "direct" }))).unwrap();

    assert_eq!(obj.camel_case.as_deref(), Some("direct"));
}

#[test]
fn test_snake_case_key_reaches_setter() {
    let mut obj = WithSetters::default();

    obj.hydrate(&payload(json!({ "title": "x" }))).unwrap();

    assert_eq!(obj.title(), Some("x"));
}

#[test]
fn test_field_wins_over_setter() {
    let mut obj = FieldAndSetter::default();

    obj.hydrate(&payload(json!({ "published_at": "2024-01-01" })))
        .unwrap();

    assert_eq!(obj.published_at.as_deref(), Some("2024-01-01"));
    assert!(!obj.setter_used);
}

#[test]
fn test_exception_on_invalid_data_key() {
    let mut obj = PublicFields::default();

    let err = obj.hydrate(&payload(json!({ "test": "" }))).unwrap_err();

    assert!(matches!(err, HydrationError::UnknownAttribute { .. }));
    assert_eq!(err.to_string(), "Invalid attribute provided \"test\"");
}

#[test]
fn test_unknown_key_stops_after_earlier_keys() {
    let mut obj = PublicFields::default();

    let err = obj
        .hydrate(&payload(json!({ "title": "kept", "unknown": 1, "description": "skipped" })))
        .unwrap_err();

    assert_eq!(err.key(), "unknown");
    assert_eq!(obj.title.as_deref(), Some("kept"));
    assert!(obj.description.is_none());
}

#[test]
fn test_structural_assignment_of_typed_fields() {
    let mut obj = Typed::default();

    obj.hydrate(&payload(json!({
        "count": 3,
        "tags": ["a", "b"],
        "metadata": { "source": "api" }
    })))
    .unwrap();

    assert_eq!(obj.count, 3);
    assert_eq!(obj.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(obj.metadata, json!({ "source": "api" }));
}

#[test]
fn test_mismatched_value_is_rejected() {
    let mut obj = Typed::default();

    let err = obj.hydrate(&payload(json!({ "count": "three" }))).unwrap_err();

    assert!(matches!(err, HydrationError::InvalidAttributeValue { .. }));
    assert_eq!(err.key(), "count");
    assert_eq!(obj.count, 0);
}

#[test]
fn test_hydration_is_deterministic() {
    let data = payload(json!({ "title": "a", "description": "b" }));

    let mut first = PublicFields::default();
    let mut second = PublicFields::default();
    first.hydrate(&data).unwrap();
    second.hydrate(&data).unwrap();

    assert_eq!(first.title, second.title);
    assert_eq!(first.description, second.description);
}

#[test]
fn test_request_data_is_not_consumed() {
    let data = payload(json!({ "title": "a" }));
    let mut obj = PublicFields::default();

    obj.hydrate(&data).unwrap();

    assert_eq!(data, payload(json!({ "title": "a" })));
}

// =============================================================================
// Hydration Map Tests
// =============================================================================

#[test]
fn test_each_type_has_its_own_map() {
    let fields: Vec<&str> = PublicFields::hydration_map().field_names().collect();
    assert_eq!(fields, vec!["title", "description"]);

    let setters: Vec<&str> = WithSetters::hydration_map().setter_names().collect();
    assert_eq!(setters, vec!["setTitle", "setDescription"]);
    assert_eq!(WithSetters::hydration_map().field_names().count(), 0);
}

#[test]
fn test_map_is_shared_between_instances() {
    let first = PublicFields::hydration_map() as *const HydrationMap<PublicFields>;
    let second = PublicFields::hydration_map() as *const HydrationMap<PublicFields>;
    assert_eq!(first, second);
}

#[test]
fn test_hydratable_targets_expose_capability() {
    let mut obj = PublicFields::default();
    assert!(obj.as_hydratable().is_some());
}
