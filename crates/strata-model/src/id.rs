//! Typed identifiers
//!
//! Hierarchy and budget entities are keyed by the external store, so their
//! ids are opaque strings wrapped in newtypes - mixing an `AreaId` into an
//! `ObjectiveId` position is a compile error, not a data bug. Ids the engine
//! generates itself (realization records) are ULIDs for sortability.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a store-assigned id
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Raw id string
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

entity_id!(
    /// Tenant/company scope - every entity belongs to exactly one
    TenantId
);
entity_id!(
    /// Area - root of a plan tree
    AreaId
);
entity_id!(ObjectiveId);
entity_id!(TargetId);
entity_id!(IndicatorId);
entity_id!(ActivityId);
entity_id!(
    /// Budget chapter (envelope)
    ChapterId
);
entity_id!(ExpenseId);

/// Realization record id (ULID, generated at append time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Ulid);

impl RecordId {
    /// Generate new record ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
