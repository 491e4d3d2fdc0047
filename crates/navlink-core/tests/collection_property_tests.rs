//! Property tests for relationship collections
//!
//! Random mutation sequences are replayed against a plain `Vec` model: the
//! collection must always hold exactly what the model holds, and a tracked
//! owner's live links must mirror the collection.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{bound_items, context_tracking, key, Call, Items};
use navlink_core::{EntityKey, OwnerRef, RelationshipCollection, TrackingContext};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize),
    Remove(usize),
    Set(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..64).prop_map(Op::Insert),
        2 => (0usize..64).prop_map(Op::Remove),
        2 => (0usize..64).prop_map(Op::Set),
        1 => Just(Op::Clear),
    ]
}

/// Apply `op` to both the collection and the model
///
/// Index seeds are folded into range so every generated op is valid. Each
/// inserted or replacing item gets a fresh key.
fn apply<C: navlink_core::DataContext>(
    items: &mut RelationshipCollection<EntityKey, C>,
    model: &mut Vec<EntityKey>,
    op: &Op,
    next: &mut usize,
) where
    C::Error: std::fmt::Debug,
{
    match *op {
        Op::Insert(seed) => {
            let index = seed % (model.len() + 1);
            let item = key(&format!("item:{next}"));
            *next += 1;
            items.insert(index, item.clone()).unwrap();
            model.insert(index, item);
        }
        Op::Remove(seed) if !model.is_empty() => {
            let index = seed % model.len();
            let removed = items.remove(index).unwrap();
            assert_eq!(removed, model.remove(index));
        }
        Op::Set(seed) if !model.is_empty() => {
            let index = seed % model.len();
            let item = key(&format!("item:{next}"));
            *next += 1;
            let old = items.set(index, item.clone()).unwrap();
            assert_eq!(old, std::mem::replace(&mut model[index], item));
        }
        Op::Clear => {
            items.clear().unwrap();
            model.clear();
        }
        Op::Remove(_) | Op::Set(_) => {}
    }
}

fn expected_calls(op: &Op, len_before: usize) -> usize {
    match op {
        Op::Insert(_) => 1,
        Op::Remove(_) if len_before > 0 => 1,
        Op::Set(_) if len_before > 0 => 2,
        Op::Clear => len_before,
        Op::Remove(_) | Op::Set(_) => 0,
    }
}

proptest! {
    #[test]
    fn unbound_collection_matches_vec(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut items = Items::new();
        let mut model = Vec::new();
        let mut next = 0;

        for op in &ops {
            apply(&mut items, &mut model, op, &mut next);
            prop_assert_eq!(items.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn untracked_owner_matches_vec_without_calls(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let ctx = context_tracking("someone-else");
        let mut items = bound_items("owner", &ctx);
        let mut model = Vec::new();
        let mut next = 0;

        for op in &ops {
            apply(&mut items, &mut model, op, &mut next);
        }

        prop_assert_eq!(items.as_slice(), model.as_slice());
        prop_assert!(ctx.borrow().calls.is_empty());
    }

    #[test]
    fn tracked_owner_issues_expected_call_count(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let ctx = context_tracking("owner");
        let mut items = bound_items("owner", &ctx);
        let mut model = Vec::new();
        let mut next = 0;

        for op in &ops {
            let before = ctx.borrow().calls.len();
            let expected = expected_calls(op, model.len());
            apply(&mut items, &mut model, op, &mut next);
            prop_assert_eq!(ctx.borrow().calls.len() - before, expected);
        }

        prop_assert_eq!(items.as_slice(), model.as_slice());
        // Fresh keys are always unknown to the context, so no plain links
        let plain_links = ctx
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::AddLink { .. }))
            .count();
        prop_assert_eq!(plain_links, 0);
    }

    #[test]
    fn tracking_context_links_mirror_collection(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let ctx = TrackingContext::new().shared();
        let owner = key("order:1");
        ctx.borrow_mut().attach(owner.clone()).unwrap();

        let mut items: RelationshipCollection<EntityKey, TrackingContext> =
            RelationshipCollection::new();
        let handle = ctx.clone();
        let bound_owner = owner.clone();
        items.bind_owner(move || {
            Some(OwnerRef::attached(bound_owner.clone(), "Lines", handle.clone()))
        });

        let mut model = Vec::new();
        let mut next = 0;
        for op in &ops {
            apply(&mut items, &mut model, op, &mut next);
        }

        let mut linked: Vec<EntityKey> = ctx
            .borrow()
            .links_from(&owner, "Lines")
            .into_iter()
            .cloned()
            .collect();
        linked.sort();
        let mut held = items.into_items();
        held.sort();
        prop_assert_eq!(linked, held);
    }
}
