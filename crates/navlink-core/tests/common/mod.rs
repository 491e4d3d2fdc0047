use std::collections::HashSet;

use navlink_core::{
    DataContext, EntityDescriptor, EntityKey, EntityState, OwnerRef, RelationshipCollection,
    SharedContext,
};

/// Navigation property used throughout the scenarios
#[allow(dead_code)]
pub const ITEMS: &str = "Items";

/// A context call as observed by [`RecordingContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddRelatedObject {
        owner: String,
        property: String,
        item: String,
    },
    AddLink {
        owner: String,
        property: String,
        item: String,
    },
    DeleteLink {
        owner: String,
        property: String,
        item: String,
    },
}

#[allow(dead_code)]
impl Call {
    pub fn add_related(owner: &str, property: &str, item: &str) -> Self {
        Call::AddRelatedObject {
            owner: owner.to_string(),
            property: property.to_string(),
            item: item.to_string(),
        }
    }

    pub fn add_link(owner: &str, property: &str, item: &str) -> Self {
        Call::AddLink {
            owner: owner.to_string(),
            property: property.to_string(),
            item: item.to_string(),
        }
    }

    pub fn delete_link(owner: &str, property: &str, item: &str) -> Self {
        Call::DeleteLink {
            owner: owner.to_string(),
            property: property.to_string(),
            item: item.to_string(),
        }
    }
}

/// Failure injected by [`RecordingContext::fail_on_call`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote rejected {call:?}")]
pub struct RemoteFailure {
    pub call: Call,
}

/// Context double that records every relationship call it receives
///
/// Tracking is a plain key set. Every attempted call is recorded, including
/// the one that fails.
#[derive(Debug, Default)]
pub struct RecordingContext {
    tracked: HashSet<EntityKey>,
    pub calls: Vec<Call>,
    fail_on: Option<usize>,
}

#[allow(dead_code)]
impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, key: &str) {
        self.tracked.insert(EntityKey::from(key));
    }

    pub fn untrack(&mut self, key: &str) {
        self.tracked.remove(&EntityKey::from(key));
    }

    /// Make the n-th call from now (1-based) fail
    pub fn fail_on_call(&mut self, n: usize) {
        self.fail_on = Some(self.calls.len() + n);
    }

    fn record(&mut self, call: Call) -> Result<(), RemoteFailure> {
        self.calls.push(call.clone());
        if self.fail_on == Some(self.calls.len()) {
            return Err(RemoteFailure { call });
        }
        Ok(())
    }
}

impl DataContext for RecordingContext {
    type Error = RemoteFailure;

    fn descriptor(&self, key: &EntityKey) -> Option<EntityDescriptor> {
        self.tracked
            .get(key)
            .map(|k| EntityDescriptor::new(k.clone(), EntityState::Unchanged))
    }

    fn add_related_object(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), RemoteFailure> {
        self.record(Call::add_related(owner.as_str(), property, item.as_str()))?;
        self.tracked.insert(item.clone());
        Ok(())
    }

    fn add_link(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), RemoteFailure> {
        self.record(Call::add_link(owner.as_str(), property, item.as_str()))
    }

    fn delete_link(
        &mut self,
        owner: &EntityKey,
        property: &str,
        item: &EntityKey,
    ) -> Result<(), RemoteFailure> {
        self.record(Call::delete_link(owner.as_str(), property, item.as_str()))
    }
}

pub type Items = RelationshipCollection<EntityKey, RecordingContext>;

#[allow(dead_code)]
pub fn key(s: &str) -> EntityKey {
    EntityKey::from(s)
}

/// Shared recording context with `owner` already tracked
#[allow(dead_code)]
pub fn context_tracking(owner: &str) -> SharedContext<RecordingContext> {
    let mut ctx = RecordingContext::new();
    ctx.track(owner);
    std::rc::Rc::new(std::cell::RefCell::new(ctx))
}

/// Collection bound to `owner.Items` in `ctx`
#[allow(dead_code)]
pub fn bound_items(owner: &str, ctx: &SharedContext<RecordingContext>) -> Items {
    let mut items = Items::new();
    let owner = key(owner);
    let ctx = ctx.clone();
    items.bind_owner(move || Some(OwnerRef::attached(owner.clone(), ITEMS, ctx.clone())));
    items
}

/// Seed a bound collection with tracked items, then forget the seeding calls
#[allow(dead_code)]
pub fn seed(items: &mut Items, ctx: &SharedContext<RecordingContext>, keys: &[&str]) {
    for k in keys {
        ctx.borrow_mut().track(k);
        items.push(key(k)).unwrap();
    }
    ctx.borrow_mut().calls.clear();
}

#[allow(dead_code)]
pub fn keys_of(items: &Items) -> Vec<&str> {
    items.iter().map(EntityKey::as_str).collect()
}
