//! Macros for declaring hydratable types
//!
//! These macros generate the [`Hydrate`](crate::core::hydration::Hydrate) and
//! [`Target`](crate::core::hydration::Target) implementations for a struct,
//! so its public attributes are known at compile time.

/// Declare which fields and setters of a struct accept request data
///
/// Fields are exposed under their Rust name unless renamed with
/// `as "publicName"`. Setters are listed with their argument type and
/// answer to the camelCase form of their name (`set_title` → `setTitle`).
///
/// # Example
///
/// ```rust
/// use data_handler::prelude::*;
/// use serde_json::json;
///
/// #[derive(Debug, Default)]
/// pub struct Article {
///     pub title: String,
///     pub camel_case: Option<String>,
///     description: String,
/// }
///
/// impl Article {
///     pub fn set_description(&mut self, description: String) {
///         self.description = description.trim().to_string();
///     }
/// }
///
/// impl_hydratable!(Article {
///     fields: [
///         title: String,
///         camel_case as "camelCase": Option<String>,
///     ],
///     setters: [
///         set_description(String),
///     ],
/// });
///
/// let mut article = Article::default();
/// let data = json!({ "title": "Hello", "camel_case": "x", "description": " text " });
/// article.hydrate(data.as_object().unwrap()).unwrap();
///
/// assert_eq!(article.title, "Hello");
/// assert_eq!(article.camel_case.as_deref(), Some("x"));
/// assert_eq!(article.description, "text");
/// ```
#[macro_export]
macro_rules! impl_hydratable {
    (
        $type:ident {
            fields: [
                $( $field:ident $( as $public:literal )? : $field_type:ty ),* $(,)?
            ]
            $(,)?
        }
    ) => {
        $crate::impl_hydratable!($type {
            fields: [ $( $field $( as $public )? : $field_type ),* ],
            setters: [],
        });
    };

    (
        $type:ident {
            fields: [
                $( $field:ident $( as $public:literal )? : $field_type:ty ),* $(,)?
            ],
            setters: [
                $( $setter:ident ( $setter_type:ty ) ),* $(,)?
            ]
            $(,)?
        }
    ) => {
        impl $crate::core::hydration::Hydrate for $type {
            fn hydration_map() -> &'static $crate::core::hydration::HydrationMap<Self> {
                static MAP: ::std::sync::OnceLock<$crate::core::hydration::HydrationMap<$type>> =
                    ::std::sync::OnceLock::new();

                MAP.get_or_init(|| {
                    $crate::core::hydration::HydrationMap::<$type>::new()
                        $(
                            .field(
                                $crate::__hydration_name!($field $(, $public)?),
                                |target: &mut $type, value: $crate::__private::serde_json::Value| {
                                    target.$field =
                                        $crate::__private::serde_json::from_value::<$field_type>(value)?;
                                    Ok(())
                                },
                            )
                        )*
                        $(
                            .setter(
                                stringify!($setter),
                                |target: &mut $type, value: $crate::__private::serde_json::Value| {
                                    target.$setter(
                                        $crate::__private::serde_json::from_value::<$setter_type>(value)?,
                                    );
                                    Ok(())
                                },
                            )
                        )*
                })
            }
        }

        impl $crate::core::hydration::Target for $type {
            fn as_hydratable(&mut self) -> Option<&mut dyn $crate::core::hydration::Hydratable> {
                Some(self)
            }
        }
    };
}

/// Public name of a hydratable field: the explicit rename, or the field name
#[doc(hidden)]
#[macro_export]
macro_rules! __hydration_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $public:literal) => {
        $public
    };
}

/// Declare a non-hydratable target
///
/// ```rust
/// use data_handler::impl_target;
///
/// pub struct Command {
///     pub name: String,
/// }
///
/// impl_target!(Command);
/// ```
#[macro_export]
macro_rules! impl_target {
    ($( $type:ty ),+ $(,)?) => {
        $(
            impl $crate::core::hydration::Target for $type {}
        )+
    };
}
