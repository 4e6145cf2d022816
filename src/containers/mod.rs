//! Containers and the entity registry.
//!
//! - `Container`: ordered item sequence with per-observer visibility
//! - `EntityRegistry`: id allocation, typed lookup, item locations

pub mod container;
pub mod registry;

pub use container::{Container, InsertPosition};
pub use registry::{Entity, EntityRegistry};
