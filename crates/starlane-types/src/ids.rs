//! Type-safe identifier wrappers around small integers.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Location ids are
//! assigned by whoever builds the world (the generator numbers them
//! `1..=count`), so there is no random constructor.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wrap a raw integer value.
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Return the raw integer value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a location (node in the gate network).
    LocationId(u32)
}

define_id! {
    /// Identifier of the faction that owns a location. `0` means unclaimed.
    FactionId(i32)
}

define_id! {
    /// Identifier of the caller a command is executed for.
    CallerId(i32)
}

impl FactionId {
    /// The "nobody owns this" faction.
    pub const UNCLAIMED: Self = Self(0);

    /// Whether this is the unclaimed sentinel.
    pub const fn is_unclaimed(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_ids_order_numerically() {
        let mut ids = vec![LocationId(10), LocationId(2), LocationId(7)];
        ids.sort();
        assert_eq!(ids, vec![LocationId(2), LocationId(7), LocationId(10)]);
    }

    #[test]
    fn display_prints_raw_number() {
        assert_eq!(LocationId::new(42).to_string(), "42");
        assert_eq!(CallerId::new(-3).to_string(), "-3");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&LocationId(5)).unwrap_or_default();
        assert_eq!(json, "5");
        let back: Result<LocationId, _> = serde_json::from_str("9");
        assert_eq!(back.ok(), Some(LocationId(9)));
    }

    #[test]
    fn unclaimed_faction_is_zero() {
        assert!(FactionId::UNCLAIMED.is_unclaimed());
        assert!(FactionId::default().is_unclaimed());
        assert!(!FactionId(3).is_unclaimed());
    }
}
