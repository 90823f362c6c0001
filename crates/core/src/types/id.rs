//! Newtype ids for type-safe document references.
//!
//! Documents in the remote store are keyed by opaque strings. The
//! `define_doc_id!` macro creates a distinct wrapper per collection so a
//! `ProductId` can never be passed where a `CustomerId` is expected.

/// Macro to define a type-safe document id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use tillpoint_core::define_doc_id;
/// define_doc_id!(StoreId);
/// define_doc_id!(ProductId);
///
/// let store_id = StoreId::new("st_01");
/// let product_id = ProductId::new("pr_01");
///
/// // These are different types, so this won't compile:
/// // let _: StoreId = product_id;
/// ```
#[macro_export]
macro_rules! define_doc_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Standard entity ids, one per document collection.
define_doc_id!(TenantId);
define_doc_id!(StoreId);
define_doc_id!(ProductId);
define_doc_id!(CustomerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        let id = StoreId::new("st_42");
        assert_eq!(id.to_string(), "st_42");
        assert_eq!(id.as_str(), "st_42");
    }

    #[test]
    fn round_trips_through_string() {
        let id = ProductId::from("pr_7");
        let s: String = id.clone().into();
        assert_eq!(ProductId::from(s), id);
    }
}
