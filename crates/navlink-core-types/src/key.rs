//! Entity identity
//!
//! A context tracks entities by key rather than by value, so a key is all the
//! relationship machinery ever needs to see of an entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an entity within a context
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Generate a new random EntityKey using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization or fixed ids)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for EntityKey {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_key_generation() {
        let k1 = EntityKey::new();
        let k2 = EntityKey::new();

        // Should generate different keys
        assert_ne!(k1, k2);
        assert!(!k1.as_str().is_empty());
    }

    #[test]
    fn test_entity_key_display() {
        let key = EntityKey::from_string("order:1");
        assert_eq!(format!("{}", key), "order:1");
        assert_eq!(key, EntityKey::from("order:1"));
    }

    #[test]
    fn test_entity_key_serializes_as_plain_string() {
        let key = EntityKey::from("line:7");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"line:7\"");

        let back: EntityKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
