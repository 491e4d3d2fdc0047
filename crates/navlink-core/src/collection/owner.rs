//! Deferred owner binding
//!
//! A collection is usually built before the entity that exposes it knows its
//! own identity or context, so it is handed a resolver instead of an owner.
//! The resolver runs on every mutating call; its answer is never cached.

use navlink_core_types::EntityKey;

use crate::context::SharedContext;

/// The relationship a collection materializes: `owner.property`
pub struct OwnerRef<C> {
    owner: EntityKey,
    property: String,
    context: Option<SharedContext<C>>,
}

impl<C> OwnerRef<C> {
    /// Owner reference with an optional context
    pub fn new(
        owner: EntityKey,
        property: impl Into<String>,
        context: Option<SharedContext<C>>,
    ) -> Self {
        Self {
            owner,
            property: property.into(),
            context,
        }
    }

    /// Owner that exposes `context`
    pub fn attached(owner: EntityKey, property: impl Into<String>, context: SharedContext<C>) -> Self {
        Self::new(owner, property, Some(context))
    }

    /// Owner that has no context yet
    pub fn detached(owner: EntityKey, property: impl Into<String>) -> Self {
        Self::new(owner, property, None)
    }

    /// Key of the owner entity
    pub fn owner(&self) -> &EntityKey {
        &self.owner
    }

    /// Navigation property name on the owner
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The owner's context, if it has one
    pub fn context(&self) -> Option<&SharedContext<C>> {
        self.context.as_ref()
    }
}

impl<C> Clone for OwnerRef<C> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            property: self.property.clone(),
            context: self.context.clone(),
        }
    }
}

impl<C> std::fmt::Debug for OwnerRef<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerRef")
            .field("owner", &self.owner)
            .field("property", &self.property)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Lazily yields the owner reference of a collection
///
/// Returning `None` means the owner cannot be resolved right now (for
/// example, it has been dropped or not yet built); the collection then skips
/// remote synchronization for that call.
///
/// Any `Fn() -> Option<OwnerRef<C>>` closure is a resolver.
pub trait OwnerResolver<C> {
    fn resolve(&self) -> Option<OwnerRef<C>>;
}

impl<C, F> OwnerResolver<C> for F
where
    F: Fn() -> Option<OwnerRef<C>>,
{
    fn resolve(&self) -> Option<OwnerRef<C>> {
        self()
    }
}
