pub mod descriptor;
pub mod entity;

pub use descriptor::{EntityDescriptor, EntityState, LinkDescriptor, LinkOrigin, LinkState};
pub use entity::Entity;
