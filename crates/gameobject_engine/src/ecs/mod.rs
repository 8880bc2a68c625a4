//! Entity and module system
//!
//! Entities are nodes of a scene forest. Each one owns an ordered list of
//! behavior modules; the [`World`] owns the entities and the graph edges
//! between them.

pub mod world;
pub mod entity;
pub mod module;
pub mod components;

pub use world::{World, SceneError};
pub use entity::{Entity, EntityId};
pub use module::{Module, ModuleError, ModuleKind, ModuleKinds, ModuleType};

#[cfg(test)]
mod tests;
