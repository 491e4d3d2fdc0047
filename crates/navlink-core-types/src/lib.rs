//! Core types shared across navlink facilities
//!
//! This crate provides foundational types used by the relationship
//! collection, the tracking context, and the logging facility:
//!
//! - **Identity**: EntityKey, the opaque handle a context tracks entities by
//! - **Schema constants**: Canonical field keys and event names

pub mod key;
pub mod schema;

pub use key::EntityKey;
