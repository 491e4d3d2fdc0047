//! Context-held tracking records
//!
//! A descriptor is what a context keeps for every entity and link it knows
//! about. Its state says how the record differs from what was last accepted.

use navlink_core_types::EntityKey;
use serde::{Deserialize, Serialize};

/// Change state of a tracked entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    /// Known to the context and unmodified since the last accept
    Unchanged,
    /// Added since the last accept
    Added,
    /// Marked for deletion
    Deleted,
}

/// Change state of a tracked link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Unchanged,
    Added,
    Deleted,
}

/// How a link record came to be known by its context
///
/// Decides what deleting and re-adding the link turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrigin {
    /// Loaded from the remote side, or accepted since
    Loaded,
    /// Created locally and not yet accepted
    Local,
    /// Deleted without ever being loaded; may or may not exist remotely
    Unloaded,
}

/// Record indicating an entity is tracked by a context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Key of the tracked entity
    pub key: EntityKey,

    /// Current change state
    pub state: EntityState,
}

impl EntityDescriptor {
    /// Create a descriptor in the given state
    pub fn new(key: EntityKey, state: EntityState) -> Self {
        Self { key, state }
    }

    /// Check if the entity is marked for deletion
    pub fn is_deleted(&self) -> bool {
        self.state == EntityState::Deleted
    }
}

/// A relationship `source.property -> target` recorded by a context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    /// Owner side of the link
    pub source: EntityKey,

    /// Navigation property on the owner
    pub property: String,

    /// Related entity
    pub target: EntityKey,

    /// Current change state
    pub state: LinkState,

    pub origin: LinkOrigin,
}

impl LinkDescriptor {
    /// Create a link record; its origin follows from the initial state
    pub fn new(source: EntityKey, property: String, target: EntityKey, state: LinkState) -> Self {
        let origin = match state {
            LinkState::Unchanged => LinkOrigin::Loaded,
            LinkState::Added => LinkOrigin::Local,
            LinkState::Deleted => LinkOrigin::Unloaded,
        };
        Self {
            source,
            property,
            target,
            state,
            origin,
        }
    }

    /// Check whether this descriptor describes `source.property -> target`
    pub fn connects(&self, source: &EntityKey, property: &str, target: &EntityKey) -> bool {
        &self.source == source && self.property == property && &self.target == target
    }

    /// Check whether either end of the link is `key`
    pub fn references(&self, key: &EntityKey) -> bool {
        &self.source == key || &self.target == key
    }

    /// Check if the link is marked for deletion
    pub fn is_deleted(&self) -> bool {
        self.state == LinkState::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_connects_exact_triple_only() {
        let link = LinkDescriptor::new(
            EntityKey::from("order:1"),
            "Lines".to_string(),
            EntityKey::from("line:1"),
            LinkState::Added,
        );

        assert!(link.connects(&"order:1".into(), "Lines", &"line:1".into()));
        assert!(!link.connects(&"order:1".into(), "Notes", &"line:1".into()));
        assert!(!link.connects(&"line:1".into(), "Lines", &"order:1".into()));
        assert!(link.references(&"line:1".into()));
        assert!(!link.references(&"line:2".into()));
    }

    #[test]
    fn test_link_origin_follows_initial_state() {
        let link = |state| {
            LinkDescriptor::new(
                EntityKey::from("order:1"),
                "Lines".to_string(),
                EntityKey::from("line:1"),
                state,
            )
            .origin
        };

        assert_eq!(link(LinkState::Unchanged), LinkOrigin::Loaded);
        assert_eq!(link(LinkState::Added), LinkOrigin::Local);
        assert_eq!(link(LinkState::Deleted), LinkOrigin::Unloaded);
    }

    #[test]
    fn test_descriptor_serialization_uses_snake_case_states() {
        let descriptor = EntityDescriptor::new(EntityKey::from("order:1"), EntityState::Unchanged);
        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["key"], "order:1");
        assert_eq!(json["state"], "unchanged");
        assert!(!descriptor.is_deleted());
    }
}
