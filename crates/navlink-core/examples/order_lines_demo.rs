//! Order Lines Demonstration
//!
//! Walks an order's `Lines` collection through its lifecycle against an
//! in-memory tracking context.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Deferred owner binding (the collection exists before the order is tracked)
//! 2. Create-and-link versus link-only inserts
//! 3. Replace and clear replayed as link deletions
//! 4. Accepting changes

use navlink_core::logging_facility::{init, Profile};
use navlink_core::{EntityKey, OwnerRef, RelationshipCollection, TrackingContext};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("=== navlink Order Lines Demo ===\n");

    let ctx = TrackingContext::new().shared();
    let order = EntityKey::from("order:1001");

    // ===== Part 1: Local-only until the owner is tracked =====
    println!("## Part 1: Deferred binding\n");

    let mut lines: RelationshipCollection<EntityKey, TrackingContext> =
        RelationshipCollection::new();
    let handle = ctx.clone();
    let owner = order.clone();
    lines.bind_owner(move || Some(OwnerRef::attached(owner.clone(), "Lines", handle.clone())));

    lines.push(EntityKey::from("line:draft"))?;
    println!(
        "Pushed a draft line: {} local, {} links in context",
        lines.len(),
        ctx.borrow().links().len()
    );
    lines.clear()?;

    ctx.borrow_mut().attach(order.clone())?;
    println!("✓ Order tracked\n");

    // ===== Part 2: Inserts =====
    println!("## Part 2: Inserts\n");

    ctx.borrow_mut().attach(EntityKey::from("line:existing"))?;
    lines.push(EntityKey::from("line:new"))?;
    lines.push(EntityKey::from("line:existing"))?;

    for link in ctx.borrow().links() {
        println!("  {} -> {} ({:?})", link.property, link.target, link.state);
    }
    println!();

    // ===== Part 3: Replace and clear =====
    println!("## Part 3: Replace and clear\n");

    let old = lines.set(0, EntityKey::from("line:replacement"))?;
    println!("✓ Replaced {}", old);

    let summary = ctx.borrow_mut().accept_changes();
    println!("Accepted: {}", serde_json::to_string(&summary)?);

    lines.clear()?;
    println!(
        "✓ Cleared; {} links pending deletion",
        ctx.borrow().links().iter().filter(|l| l.is_deleted()).count()
    );

    let summary = ctx.borrow_mut().accept_changes();
    println!("Accepted: {}", serde_json::to_string_pretty(&summary)?);

    println!("\n=== Demo Complete ===");
    Ok(())
}
