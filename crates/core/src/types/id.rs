//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are backed by `String`: the backend exposes product identifiers that
//! arrive sometimes as JSON numbers and sometimes as JSON strings, and cart
//! entries persisted by older storefront builds carry the raw numeric form.
//! Every construction path normalizes to the canonical string form, so two
//! IDs compare equal whenever their canonical forms match, regardless of how
//! they arrived.

/// Macro to define a type-safe, string-normalized ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string
/// - `Deserialize` from either a JSON string or a JSON integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_string()`
/// - `From<&str>`, `From<String>`, and `From<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use tech_nexus_core::define_id;
/// define_id!(ProductId);
/// define_id!(CategoryId);
///
/// // Numeric and string origins normalize to the same key:
/// assert_eq!(ProductId::from(7), ProductId::from("7"));
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = CategoryId::from("7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from anything with a canonical string form.
            #[must_use]
            pub fn new(id: impl ::core::fmt::Display) -> Self {
                Self(id.to_string())
            }

            /// The canonical string form of the ID.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID, yielding its canonical string form.
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id.to_string())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                // Accept both the canonical string form and the raw numeric
                // form written by historic storefront builds.
                #[derive(::serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Text(String),
                    Signed(i64),
                    Unsigned(u64),
                }

                Ok(match Raw::deserialize(deserializer)? {
                    Raw::Text(s) => Self(s),
                    Raw::Signed(n) => Self(n.to_string()),
                    Raw::Unsigned(n) => Self(n.to_string()),
                })
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CategoryId);
