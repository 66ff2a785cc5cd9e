//! Type-safe identifiers.
//!
//! Newtype wrappers prevent mixing mount IDs with arbitrary UUIDs or
//! strings coming from a browser bridge.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// ============================================================================
// MountId
// ============================================================================

/// Identity of one mount episode.
///
/// Every call to [`EmbedResolver::mount`](crate::EmbedResolver::mount)
/// generates a fresh ID, even for an identical target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountId(Uuid);

impl MountId {
    /// Generates a new random mount ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[inline]
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::protocol(format!("malformed mount id '{s}': {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(MountId::generate(), MountId::generate());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let id = MountId::generate();
        let parsed: MountId = id.to_string().parse().expect("parse mount id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<MountId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = MountId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
    }
}
