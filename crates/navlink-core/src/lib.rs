//! navlink core - change-tracked relationship collections
//!
//! This crate keeps an in-memory ordered collection of related entities in
//! step with the relationship state of a context:
//! - `RelationshipCollection` intercepts insert/remove/replace/clear and
//!   replays them as link operations before mutating local storage
//! - `OwnerResolver` defers owner binding until the owner actually exists
//! - `DataContext` is the capability contract the context must provide
//! - `TrackingContext` is an in-memory context with entity and link
//!   descriptors and change states
//!
//! Remote synchronization only happens while the owner is tracked by its
//! context; until then the collection behaves like a plain list.

pub mod collection;
pub mod context;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use collection::{OwnerRef, OwnerResolver, RelationshipCollection};
pub use context::{ChangeSummary, DataContext, SharedContext, TrackingContext};
pub use errors::{ExError, ExErrorKind, NavLinkError, Result};
pub use model::{Entity, EntityDescriptor, EntityState, LinkDescriptor, LinkOrigin, LinkState};
pub use navlink_core_types::EntityKey;

#[doc(hidden)]
pub mod __private {
    pub use navlink_core_types::schema;
    pub use tracing;
}
