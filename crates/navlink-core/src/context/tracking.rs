//! In-memory tracking context
//!
//! Keeps entity and link descriptors with their change states. This is the
//! reference [`DataContext`]: applications use it directly, and it backs the
//! relationship collection in tests and demos.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use navlink_core_types::EntityKey;
use serde::{Deserialize, Serialize};

use crate::context::{DataContext, SharedContext};
use crate::errors::{NavLinkError, Result};
use crate::model::{EntityDescriptor, EntityState, LinkDescriptor, LinkOrigin, LinkState};
use crate::{log_op_end, log_op_error, log_op_start};

/// Counts of records touched by [`TrackingContext::accept_changes`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Added entities now unchanged
    pub entities_accepted: usize,
    /// Added links now unchanged
    pub links_accepted: usize,
    /// Deleted entities dropped
    pub entities_removed: usize,
    /// Deleted links dropped, including links whose entity was dropped
    pub links_removed: usize,
}

/// In-memory store of entity and link descriptors
///
/// Not thread-safe; share it between collections with [`TrackingContext::shared`].
/// Every link references two tracked entities: removing an entity's
/// descriptor removes its links with it.
#[derive(Debug, Clone, Default)]
pub struct TrackingContext {
    /// Map of entity key to descriptor
    pub(crate) entities: HashMap<EntityKey, EntityDescriptor>,
    /// Link descriptors in the order they were first recorded
    pub(crate) links: Vec<LinkDescriptor>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl TrackingContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this context in the handle owners hand out to their collections
    pub fn shared(self) -> SharedContext<Self> {
        Rc::new(RefCell::new(self))
    }

    // ===== Entities =====

    /// Track an entity that already exists remotely
    ///
    /// # Errors
    ///
    /// Returns `EntityAlreadyTracked` if the key has a descriptor.
    pub fn attach(&mut self, key: EntityKey) -> Result<()> {
        self.track(key, EntityState::Unchanged)
    }

    /// Track a new entity
    ///
    /// # Errors
    ///
    /// Returns `EntityAlreadyTracked` if the key has a descriptor.
    pub fn add_object(&mut self, key: EntityKey) -> Result<()> {
        self.track(key, EntityState::Added)
    }

    fn track(&mut self, key: EntityKey, state: EntityState) -> Result<()> {
        if self.entities.contains_key(&key) {
            return Err(NavLinkError::EntityAlreadyTracked { entity_key: key });
        }
        tracing::debug!(entity_key = %key, state = ?state, "entity tracked");
        self.entities
            .insert(key.clone(), EntityDescriptor::new(key, state));
        Ok(())
    }

    /// Mark an entity for deletion
    ///
    /// An entity added since the last accept is forgotten outright, together
    /// with its links.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotTracked` if the key has no descriptor.
    pub fn delete_object(&mut self, key: &EntityKey) -> Result<()> {
        let state = self.require_tracked(key)?.state;
        if state == EntityState::Added {
            self.forget(key);
        } else if let Some(descriptor) = self.entities.get_mut(key) {
            descriptor.state = EntityState::Deleted;
        }
        Ok(())
    }

    /// Stop tracking an entity and every link that references it
    ///
    /// # Errors
    ///
    /// Returns `EntityNotTracked` if the key has no descriptor.
    pub fn detach(&mut self, key: &EntityKey) -> Result<()> {
        self.require_tracked(key)?;
        self.forget(key);
        Ok(())
    }

    fn forget(&mut self, key: &EntityKey) {
        self.entities.remove(key);
        let before = self.links.len();
        self.links.retain(|link| !link.references(key));
        tracing::debug!(
            entity_key = %key,
            links_dropped = before - self.links.len(),
            "entity forgotten"
        );
    }

    /// Get the descriptor of an entity
    pub fn entity(&self, key: &EntityKey) -> Option<&EntityDescriptor> {
        self.entities.get(key)
    }

    /// List all entity descriptors, sorted by key
    pub fn entities(&self) -> Vec<&EntityDescriptor> {
        let mut entities: Vec<_> = self.entities.values().collect();
        entities.sort_by(|a, b| a.key.cmp(&b.key));
        entities
    }

    // ===== Links =====

    /// Record a link that already exists remotely
    ///
    /// # Errors
    ///
    /// Returns `InvalidProperty`, `EntityNotTracked`, `EntityDeleted`, or
    /// `DuplicateLink` if any descriptor for the triple exists.
    pub fn attach_link(
        &mut self,
        source: &EntityKey,
        property: &str,
        target: &EntityKey,
    ) -> Result<()> {
        validate_property(property)?;
        self.require_live(source)?;
        self.require_live(target)?;

        if self.link_position(source, property, target).is_some() {
            return Err(duplicate_link(source, property, target));
        }

        self.links.push(LinkDescriptor::new(
            source.clone(),
            property.to_string(),
            target.clone(),
            LinkState::Unchanged,
        ));
        Ok(())
    }

    /// Get the descriptor of the link `source.property -> target`
    pub fn link(
        &self,
        source: &EntityKey,
        property: &str,
        target: &EntityKey,
    ) -> Option<&LinkDescriptor> {
        self.links
            .iter()
            .find(|link| link.connects(source, property, target))
    }

    /// All link descriptors, in the order they were first recorded
    pub fn links(&self) -> &[LinkDescriptor] {
        &self.links
    }

    /// Targets of the live links from `source.property`, in recording order
    pub fn links_from(&self, source: &EntityKey, property: &str) -> Vec<&EntityKey> {
        self.links
            .iter()
            .filter(|link| &link.source == source && link.property == property)
            .filter(|link| !link.is_deleted())
            .map(|link| &link.target)
            .collect()
    }

    fn link_position(&self, source: &EntityKey, property: &str, target: &EntityKey) -> Option<usize> {
        self.links
            .iter()
            .position(|link| link.connects(source, property, target))
    }

    // ===== Change lifecycle =====

    /// Check whether any descriptor differs from the last accepted state
    pub fn has_pending_changes(&self) -> bool {
        self.entities
            .values()
            .any(|e| e.state != EntityState::Unchanged)
            || self.links.iter().any(|l| l.state != LinkState::Unchanged)
    }

    /// Accept all pending changes
    ///
    /// Added records become unchanged; deleted records are dropped, and so is
    /// any link left pointing at a dropped entity.
    pub fn accept_changes(&mut self) -> ChangeSummary {
        log_op_start!("accept_changes");
        let start = Instant::now();

        let mut summary = ChangeSummary::default();

        let deleted: Vec<EntityKey> = self
            .entities
            .values()
            .filter(|e| e.is_deleted())
            .map(|e| e.key.clone())
            .collect();
        for key in &deleted {
            self.entities.remove(key);
        }
        summary.entities_removed = deleted.len();

        for descriptor in self.entities.values_mut() {
            if descriptor.state == EntityState::Added {
                descriptor.state = EntityState::Unchanged;
                summary.entities_accepted += 1;
            }
        }

        let before = self.links.len();
        self.links
            .retain(|link| !link.is_deleted() && !deleted.iter().any(|key| link.references(key)));
        summary.links_removed = before - self.links.len();

        for link in &mut self.links {
            if link.state == LinkState::Added {
                link.state = LinkState::Unchanged;
                link.origin = LinkOrigin::Loaded;
                summary.links_accepted += 1;
            }
        }

        log_op_end!(
            "accept_changes",
            duration_ms = elapsed_ms(start),
            entities_accepted = summary.entities_accepted,
            links_accepted = summary.links_accepted,
            entities_removed = summary.entities_removed,
            links_removed = summary.links_removed
        );
        summary
    }

    // ===== Guards =====

    fn require_tracked(&self, key: &EntityKey) -> Result<&EntityDescriptor> {
        self.entities
            .get(key)
            .ok_or_else(|| NavLinkError::EntityNotTracked {
                entity_key: key.clone(),
            })
    }

    fn require_live(&self, key: &EntityKey) -> Result<&EntityDescriptor> {
        let descriptor = self.require_tracked(key)?;
        if descriptor.is_deleted() {
            return Err(NavLinkError::EntityDeleted {
                entity_key: key.clone(),
            });
        }
        Ok(descriptor)
    }

    // ===== Relationship operations =====

    fn add_related_object_impl(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<()> {
        validate_property(property)?;
        self.require_live(owner)?;
        if self.entities.contains_key(item) {
            return Err(NavLinkError::EntityAlreadyTracked {
                entity_key: item.clone(),
            });
        }

        self.entities.insert(
            item.clone(),
            EntityDescriptor::new(item.clone(), EntityState::Added),
        );
        self.links.push(LinkDescriptor::new(
            owner.clone(),
            property.to_string(),
            item.clone(),
            LinkState::Added,
        ));
        Ok(())
    }

    fn add_link_impl(&mut self, owner: &EntityKey, property: &str, item: &EntityKey) -> Result<()> {
        validate_property(property)?;
        self.require_live(owner)?;
        self.require_live(item)?;

        match self.link_position(owner, property, item) {
            Some(index) if self.links[index].is_deleted() => {
                let link = &mut self.links[index];
                // Only a loaded link is known to still exist remotely.
                link.state = match link.origin {
                    LinkOrigin::Loaded => LinkState::Unchanged,
                    LinkOrigin::Local | LinkOrigin::Unloaded => LinkState::Added,
                };
            }
            Some(_) => return Err(duplicate_link(owner, property, item)),
            None => self.links.push(LinkDescriptor::new(
                owner.clone(),
                property.to_string(),
                item.clone(),
                LinkState::Added,
            )),
        }
        Ok(())
    }

    fn delete_link_impl(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<()> {
        validate_property(property)?;
        self.require_tracked(owner)?;
        self.require_tracked(item)?;

        match self.link_position(owner, property, item) {
            Some(index) => {
                let link = &self.links[index];
                match (link.state, link.origin) {
                    (LinkState::Added, LinkOrigin::Unloaded) => {
                        self.links[index].state = LinkState::Deleted;
                    }
                    (LinkState::Added, _) => {
                        self.links.remove(index);
                    }
                    (LinkState::Unchanged, _) => self.links[index].state = LinkState::Deleted,
                    (LinkState::Deleted, _) => {}
                }
            }
            // The remote side may hold a link this context never loaded.
            None => self.links.push(LinkDescriptor::new(
                owner.clone(),
                property.to_string(),
                item.clone(),
                LinkState::Deleted,
            )),
        }
        Ok(())
    }
}

fn validate_property(property: &str) -> Result<()> {
    if property.trim().is_empty() {
        return Err(NavLinkError::InvalidProperty {
            reason: "Navigation property cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn duplicate_link(source: &EntityKey, property: &str, target: &EntityKey) -> NavLinkError {
    NavLinkError::DuplicateLink {
        source_key: source.clone(),
        property: property.to_string(),
        target_key: target.clone(),
    }
}

impl DataContext for TrackingContext {
    type Error = NavLinkError;

    fn descriptor(&self, key: &EntityKey) -> Option<EntityDescriptor> {
        self.entities.get(key).cloned()
    }

    fn is_tracked(&self, key: &EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    fn add_related_object(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<()> {
        log_op_start!(
            "add_related_object",
            owner_key = %owner,
            property = property,
            item_key = %item
        );
        let start = Instant::now();

        self.add_related_object_impl(owner, property, item)
            .map_err(|e| {
                log_op_error!("add_related_object", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!("add_related_object", duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn add_link(&mut self, owner: &EntityKey, property: &str, item: &EntityKey) -> Result<()> {
        log_op_start!(
            "add_link",
            owner_key = %owner,
            property = property,
            item_key = %item
        );
        let start = Instant::now();

        self.add_link_impl(owner, property, item).map_err(|e| {
            log_op_error!("add_link", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("add_link", duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn delete_link(&mut self, owner: &EntityKey, property: &str, item: &EntityKey) -> Result<()> {
        log_op_start!(
            "delete_link",
            owner_key = %owner,
            property = property,
            item_key = %item
        );
        let start = Instant::now();

        self.delete_link_impl(owner, property, item).map_err(|e| {
            log_op_error!("delete_link", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("delete_link", duration_ms = elapsed_ms(start));
        Ok(())
    }
}
