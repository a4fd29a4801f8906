//! Newtype IDs for type-safe entity references.
//!
//! The Savor backend issues opaque string identifiers (Firestore-style), so
//! IDs here wrap `String` rather than integers. Use the `define_id!` macro to
//! create wrappers that prevent accidentally mixing IDs from different entity
//! types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use savor_core::define_id;
/// define_id!(BagId);
/// define_id!(OrderId);
///
/// let bag_id = BagId::new("bag-1");
/// let order_id = OrderId::new("bag-1");
///
/// // These are different types, so this won't compile:
/// // let _: BagId = order_id;
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

            /// Consume the wrapper, returning the underlying `String`.
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
                Self(id.to_string())
            }
        }
    };
}

// Define standard entity IDs
define_id!(StoreId);
define_id!(ReservationId);
define_id!(PaymentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = StoreId::new("store-42");
        assert_eq!(id.as_str(), "store-42");
        assert_eq!(id.to_string(), "store-42");
        assert_eq!(StoreId::from("store-42"), id);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ReservationId::new("res-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"res-1\"");
        let back: ReservationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
