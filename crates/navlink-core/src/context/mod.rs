//! Context capability contract
//!
//! A context owns the set of tracked entities and the links between them.
//! Relationship collections only ever talk to it through [`DataContext`].

pub mod tracking;

use std::cell::RefCell;
use std::rc::Rc;

use navlink_core_types::EntityKey;

use crate::model::EntityDescriptor;

pub use tracking::{ChangeSummary, TrackingContext};

/// Handle through which an owner entity exposes its context
///
/// Single-threaded by construction: collections and the context they feed
/// must be driven from one thread of control.
pub type SharedContext<C> = Rc<RefCell<C>>;

/// Capabilities a relationship collection requires from its owner's context
pub trait DataContext {
    /// Failure reported by the context; collections propagate it unchanged
    type Error: std::error::Error;

    /// Descriptor of `key` if the context tracks it
    fn descriptor(&self, key: &EntityKey) -> Option<EntityDescriptor>;

    /// Track `item` and link it to `owner.property` in one operation
    ///
    /// # Errors
    ///
    /// Implementation-defined; typically the owner is not tracked or the item
    /// already is.
    fn add_related_object(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), Self::Error>;

    /// Link an already tracked `item` to `owner.property`
    ///
    /// # Errors
    ///
    /// Implementation-defined; typically one side is not tracked.
    fn add_link(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), Self::Error>;

    /// Remove the link `owner.property -> item`
    ///
    /// # Errors
    ///
    /// Implementation-defined; typically one side is not tracked.
    fn delete_link(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), Self::Error>;

    /// Check whether the context has a descriptor for `key`
    fn is_tracked(&self, key: &EntityKey) -> bool {
        self.descriptor(key).is_some()
    }
}
