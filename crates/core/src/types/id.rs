//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create string-backed ID wrappers that
//! prevent accidentally mixing IDs from different entity types. Identifiers
//! in the shop are opaque strings (`m-1`, `ord-5501`, `u-101`).

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use gimco_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("u-101");
/// let order_id = OrderId::new("ord-5501");
/// assert_eq!(user_id.as_str(), "u-101");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// # let _ = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
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

define_id!(CatalogEntryId);
define_id!(CartEntryId);
define_id!(OrderId);
define_id!(OrderLineId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = OrderId::new("ord-5501");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"ord-5501\""));
    }

    #[test]
    fn test_id_display_and_conversions() {
        let id = CatalogEntryId::from("m-1");
        assert_eq!(id.to_string(), "m-1");
        assert_eq!(String::from(id.clone()), "m-1");
        assert_eq!(id.as_ref(), "m-1");
    }
}
