//! Change-tracked relationship collection
//!
//! `RelationshipCollection` looks like an ordered list to application code,
//! but every mutating call first replays the change as link operations on the
//! owner's context and only then touches local storage.
//!
//! ## Synchronization rules
//!
//! - Remote operations are issued only when the owner resolves, has a
//!   context, and is tracked in it. Otherwise the call is local-only.
//! - An item unknown to the context is added as a related object (create and
//!   link); a known item is only linked.
//! - Context errors are returned unchanged, before local storage is modified.
//! - The owner's context is mutably borrowed for the length of each mutating
//!   call, so no `Ref` into it may be held across one.
//!
//! ## Example
//!
//! ```
//! use navlink_core::{EntityKey, OwnerRef, RelationshipCollection, TrackingContext};
//!
//! let ctx = TrackingContext::new().shared();
//! let order = EntityKey::from("order:1");
//! ctx.borrow_mut().attach(order.clone()).unwrap();
//!
//! let mut lines: RelationshipCollection<EntityKey, TrackingContext> = RelationshipCollection::new();
//! let handle = ctx.clone();
//! lines.bind_owner(move || Some(OwnerRef::attached(order.clone(), "Lines", handle.clone())));
//!
//! lines.push(EntityKey::from("line:1")).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(ctx.borrow().links().len(), 1);
//! ```

use navlink_core_types::EntityKey;

use crate::collection::owner::OwnerResolver;
use crate::collection::sync::{link_item, unlink_item, with_tracked_owner};
use crate::context::DataContext;
use crate::model::Entity;

/// Ordered collection of entities related to an owner through one
/// navigation property
pub struct RelationshipCollection<T, C> {
    items: Vec<T>,
    resolver: Option<Box<dyn OwnerResolver<C>>>,
}

impl<T, C> RelationshipCollection<T, C> {
    /// Create an empty collection with no owner bound
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            resolver: None,
        }
    }

    /// Check whether an owner resolver has been bound
    pub fn is_bound(&self) -> bool {
        self.resolver.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the collection, keeping only its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Entity, C> RelationshipCollection<T, C> {
    /// Position of the first item with the given key
    pub fn index_of(&self, key: &EntityKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.index_of(key).is_some()
    }
}

impl<T: Entity, C: DataContext> RelationshipCollection<T, C> {
    /// Bind the resolver yielding this collection's owner
    ///
    /// Nothing is resolved here; a later call replaces the resolver.
    pub fn bind_owner<R>(&mut self, resolver: R)
    where
        R: OwnerResolver<C> + 'static,
    {
        if self.resolver.is_some() {
            tracing::debug!("owner resolver replaced");
        }
        self.resolver = Some(Box::new(resolver));
    }

    /// Insert `item` at `index`, shifting later items right
    ///
    /// # Errors
    ///
    /// Returns the context's error if adding the related object or link
    /// fails; the collection is unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, before any context call.
    /// Also panics if the owner's context is borrowed elsewhere during the
    /// call (for example a live `ctx.borrow()` guard).
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), C::Error> {
        let len = self.items.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        with_tracked_owner(self.resolver.as_deref(), "insert", |context, owner, property| {
            link_item(context, "insert", owner, property, item.key())
        })?;

        self.items.insert(index, item);
        Ok(())
    }

    /// Append `item` at the end
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn push(&mut self, item: T) -> Result<(), C::Error> {
        self.insert(self.items.len(), item)
    }

    /// Remove and return the item at `index`
    ///
    /// The link is deleted for the item at `index` before removal.
    ///
    /// # Errors
    ///
    /// Returns the context's error if deleting the link fails; the collection
    /// is unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, before any context call.
    /// Also panics if the owner's context is borrowed elsewhere during the
    /// call (for example a live `ctx.borrow()` guard).
    pub fn remove(&mut self, index: usize) -> Result<T, C::Error> {
        let len = self.items.len();
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        let current = self.items[index].key();
        with_tracked_owner(self.resolver.as_deref(), "remove", |context, owner, property| {
            unlink_item(context, "remove", owner, property, current)
        })?;

        Ok(self.items.remove(index))
    }

    /// Remove the first item with the given key
    ///
    /// Returns `Ok(None)` without contacting the context when no item matches.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove).
    pub fn remove_item(&mut self, key: &EntityKey) -> Result<Option<T>, C::Error> {
        match self.index_of(key) {
            Some(index) => self.remove(index).map(Some),
            None => Ok(None),
        }
    }

    /// Replace the item at `index`, returning the previous occupant
    ///
    /// The old occupant is unlinked strictly before the new item is attached.
    ///
    /// # Errors
    ///
    /// Returns the context's error from either step; the collection is
    /// unchanged in that case, although an unlink that succeeded before a
    /// failing attach stays applied in the context.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, before any context call.
    /// Also panics if the owner's context is borrowed elsewhere during the
    /// call (for example a live `ctx.borrow()` guard).
    pub fn set(&mut self, index: usize, item: T) -> Result<T, C::Error> {
        let len = self.items.len();
        assert!(
            index < len,
            "replacement index (is {index}) should be < len (is {len})"
        );

        let current = self.items[index].key();
        with_tracked_owner(self.resolver.as_deref(), "set", |context, owner, property| {
            unlink_item(context, "set", owner, property, current)?;
            link_item(context, "set", owner, property, item.key())
        })?;

        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Remove every item
    ///
    /// Each current item is unlinked in iteration order, then local storage
    /// is emptied.
    ///
    /// # Errors
    ///
    /// Returns the first context error. Items unlinked before the failure stay
    /// unlinked in the context while the collection still holds every item;
    /// callers needing atomicity must re-derive state from the context.
    ///
    /// # Panics
    ///
    /// Panics if the owner's context is borrowed elsewhere during the call.
    pub fn clear(&mut self) -> Result<(), C::Error> {
        let items = &self.items;
        with_tracked_owner(self.resolver.as_deref(), "clear", |context, owner, property| {
            for item in items {
                unlink_item(context, "clear", owner, property, item.key())?;
            }
            Ok(())
        })?;

        self.items.clear();
        Ok(())
    }
}

impl<T, C> Default for RelationshipCollection<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for RelationshipCollection<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipCollection")
            .field("items", &self.items)
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<'a, T, C> IntoIterator for &'a RelationshipCollection<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
