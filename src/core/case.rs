//! Key case conversion used by hydration
//!
//! Request payloads usually arrive in snake_case while public attribute names
//! are camelCase. These helpers are pure and independent of any target type.

use std::borrow::Cow;

/// Convert an underscore-segmented key into camelCase
///
/// The first segment is lowercased, every following segment gets its first
/// character uppercased, and the segments are concatenated. A key without any
/// underscore is returned unchanged.
///
/// # Examples
///
/// ```
/// use data_handler::core::case::camel_case;
///
/// assert_eq!(camel_case("camel_case"), "camelCase");
/// assert_eq!(camel_case("set_title"), "setTitle");
/// assert_eq!(camel_case("title"), "title");
/// ```
pub fn camel_case(key: &str) -> Cow<'_, str> {
    if !key.contains('_') {
        return Cow::Borrowed(key);
    }

    let mut segments = key.split('_');
    let mut converted = segments
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    for segment in segments {
        converted.push_str(&capitalize(segment));
    }

    Cow::Owned(converted)
}

/// Uppercase the first character of a string, leaving the rest untouched
///
/// ```
/// use data_handler::core::case::capitalize;
///
/// assert_eq!(capitalize("title"), "Title");
/// assert_eq!(capitalize("camelCase"), "CamelCase");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the setter expected for a (possibly snake_case) key
///
/// `title` → `setTitle`, `published_at` → `setPublishedAt`.
pub fn setter_name(key: &str) -> String {
    format!("set{}", capitalize(&camel_case(key)))
}
