//! Strongly-typed identifiers used across the domain.
//!
//! Two families:
//! - UUID-backed ids minted by this system (`ListId`).
//! - String-backed ids handed to us by external snapshots (`InventoryItemId`,
//!   `VendorId`). These are opaque; we never derive meaning from their text.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a shopping list aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(Uuid);

/// Identifier of an item in the external inventory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(String);

/// Identifier of a vendor in the external price catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an externally supplied identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_uuid_newtype!(ListId, "ListId");
impl_string_newtype!(InventoryItemId, "InventoryItemId");
impl_string_newtype!(VendorId, "VendorId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_id_round_trips_through_display() {
        let id = ListId::new();
        let parsed: ListId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn empty_vendor_id_is_rejected() {
        let err = "  ".parse::<VendorId>().unwrap_err();
        assert_eq!(err, DomainError::invalid_id("VendorId: empty"));
    }

    #[test]
    fn string_ids_serialize_transparently() {
        let id = VendorId::new("v1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"v1\"");
        let back: VendorId = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(back, id);
    }
}
