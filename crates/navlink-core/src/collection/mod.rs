//! Relationship collections and their owner binding

pub mod owner;
pub mod relationship;
pub mod sync;

pub use owner::{OwnerRef, OwnerResolver};
pub use relationship::RelationshipCollection;
pub use sync::{ItemTracking, SkipReason};
