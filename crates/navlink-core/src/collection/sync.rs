//! Relationship synchronization decisions
//!
//! Everything a collection decides before touching its local storage: whether
//! the owner is usable, and how each item is linked or unlinked.

use navlink_core_types::EntityKey;

use crate::collection::owner::OwnerResolver;
use crate::context::DataContext;

/// Whether an item already has a descriptor in the owner's context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTracking {
    /// Unknown to the context: created and linked in one operation
    Untracked,
    /// Known to the context: only linked
    Tracked,
}

impl ItemTracking {
    /// Classify `key` against `context` as of now
    pub fn of<C: DataContext + ?Sized>(context: &C, key: &EntityKey) -> Self {
        if context.is_tracked(key) {
            ItemTracking::Tracked
        } else {
            ItemTracking::Untracked
        }
    }
}

/// Why a mutating call did not synchronize with the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No resolver has been bound
    OwnerUnbound,
    /// The resolver yielded no owner
    OwnerUnresolved,
    /// The owner has no context
    OwnerWithoutContext,
    /// The owner has no descriptor in its context
    OwnerUntracked,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::OwnerUnbound => "owner_unbound",
            SkipReason::OwnerUnresolved => "owner_unresolved",
            SkipReason::OwnerWithoutContext => "owner_without_context",
            SkipReason::OwnerUntracked => "owner_untracked",
        }
    }
}

/// Run `apply` against the owner's context if the owner is resolvable and
/// tracked; otherwise do nothing.
///
/// The owner is resolved afresh on each call. The context stays mutably
/// borrowed while `apply` runs.
pub(crate) fn with_tracked_owner<C, F>(
    resolver: Option<&dyn OwnerResolver<C>>,
    op: &'static str,
    apply: F,
) -> Result<(), C::Error>
where
    C: DataContext,
    F: FnOnce(&mut C, &EntityKey, &str) -> Result<(), C::Error>,
{
    let Some(resolver) = resolver else {
        return skip(op, SkipReason::OwnerUnbound);
    };
    let Some(owner) = resolver.resolve() else {
        return skip(op, SkipReason::OwnerUnresolved);
    };
    let Some(context) = owner.context() else {
        return skip(op, SkipReason::OwnerWithoutContext);
    };

    let mut context = context.borrow_mut();
    if !context.is_tracked(owner.owner()) {
        return skip(op, SkipReason::OwnerUntracked);
    }

    apply(&mut *context, owner.owner(), owner.property())
}

fn skip<E>(op: &'static str, reason: SkipReason) -> Result<(), E> {
    tracing::debug!(op, reason = reason.as_str(), "relationship sync skipped");
    Ok(())
}

/// Attach `item` to `owner.property`: create and link if the context does
/// not know it, link only if it does.
pub(crate) fn link_item<C: DataContext>(
    context: &mut C,
    op: &'static str,
    owner: &EntityKey,
    property: &str,
    item: &EntityKey,
) -> Result<(), C::Error> {
    match ItemTracking::of(&*context, item) {
        ItemTracking::Untracked => {
            tracing::debug!(
                op,
                owner_key = %owner,
                property,
                item_key = %item,
                action = "add_related_object",
                "relationship operation issued"
            );
            context.add_related_object(owner, property, item)
        }
        ItemTracking::Tracked => {
            tracing::debug!(
                op,
                owner_key = %owner,
                property,
                item_key = %item,
                action = "add_link",
                "relationship operation issued"
            );
            context.add_link(owner, property, item)
        }
    }
}

/// Remove the link `owner.property -> item`
pub(crate) fn unlink_item<C: DataContext>(
    context: &mut C,
    op: &'static str,
    owner: &EntityKey,
    property: &str,
    item: &EntityKey,
) -> Result<(), C::Error> {
    tracing::debug!(
        op,
        owner_key = %owner,
        property,
        item_key = %item,
        action = "delete_link",
        "relationship operation issued"
    );
    context.delete_link(owner, property, item)
}
