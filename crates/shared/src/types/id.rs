//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PaymentId` where an
//! `InvoiceId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(LedgerId, "Unique identifier for a ledger (one set of books).");
typed_id!(AccountId, "Unique identifier for a nominal account.");
typed_id!(EntryId, "Unique identifier for a journal entry.");
typed_id!(
    PostingGroupId,
    "Unique identifier for a compound posting group."
);
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(PaymentId, "Unique identifier for a payment.");
typed_id!(AllocationId, "Unique identifier for a payment allocation.");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_unique() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_roundtrip_through_uuid() {
        let id = EntryId::new();
        let uuid: Uuid = id.into();
        assert_eq!(EntryId::from(uuid), id);
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000")]
    #[case("0198c5e4-1f3a-7000-8000-000000000001")]
    fn test_parse_valid(#[case] input: &str) {
        let id = PaymentId::from_str(input).unwrap();
        assert_eq!(id.to_string(), input);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(InvoiceId::from_str("not-a-uuid").is_err());
    }
}
