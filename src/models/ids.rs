//! Deterministic ID generation using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A deterministic entity ID derived from content hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Generate an EntityId from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type alias for tournament IDs
pub type TournamentId = EntityId;

/// Type alias for team IDs
pub type TeamId = EntityId;

/// Opaque handle to a stored team logo (e.g. `img:3`).
///
/// The scoreboard never resolves the handle itself; the image store that issued it does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogoRef(String);

impl LogoRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation_deterministic() {
        let id1 = EntityId::generate(&["summer cup", "3"]);
        let id2 = EntityId::generate(&["summer cup", "3"]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_entity_id_different_inputs() {
        let id1 = EntityId::generate(&["summer cup", "3"]);
        let id2 = EntityId::generate(&["summer cup", "4"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entity_id_field_separator_matters() {
        let id1 = EntityId::generate(&["ab", "c"]);
        let id2 = EntityId::generate(&["a", "bc"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entity_id_length_and_hex() {
        let id = EntityId::generate(&["test", "input"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entity_id_serialization() {
        let id = EntityId::generate(&["test"]);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_entity_id_display_and_debug() {
        let id = EntityId::from("abc123def456");
        assert_eq!(format!("{}", id), "abc123def456");
        assert_eq!(format!("{:?}", id), "EntityId(abc123def456)");
    }

    #[test]
    fn test_logo_ref_is_transparent() {
        let logo = LogoRef::new("img:3");
        assert_eq!(serde_json::to_string(&logo).unwrap(), "\"img:3\"");
        assert_eq!(logo.as_str(), "img:3");
    }
}
