//! Transform module
//!
//! Holds an entity's local position and a lazily recomputed world position.
//! Writes go through [`World::set_local_position`](crate::ecs::World::set_local_position)
//! so the dirty flag reaches every descendant; reads of the world position go
//! through [`World::world_position`](crate::ecs::World::world_position), which
//! pulls from the ancestors only when the cache is stale.

use crate::foundation::math::Vec3;

/// Local position plus cached world position
#[derive(Debug, Clone, PartialEq)]
pub struct TransformModule {
    local_position: Vec3,
    world_position: Vec3,
    position_dirty: bool,
}

impl Default for TransformModule {
    fn default() -> Self {
        Self {
            local_position: Vec3::zeros(),
            world_position: Vec3::zeros(),
            position_dirty: true,
        }
    }
}

impl TransformModule {
    /// Transform at the origin
    ///
    /// The world position starts stale: it depends on whatever parent the
    /// entity has when the module is attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform at `position`, relative to the parent
    pub fn from_position(position: Vec3) -> Self {
        Self {
            local_position: position,
            world_position: position,
            position_dirty: true,
        }
    }

    /// Position relative to the parent
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    /// Last computed world position; stale while [`is_dirty`](Self::is_dirty)
    pub fn cached_world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Whether the cached world position must be recomputed
    pub fn is_dirty(&self) -> bool {
        self.position_dirty
    }

    /// Overwrite the local position of this module only
    pub(crate) fn set_local_position(&mut self, position: Vec3) {
        self.local_position = position;
        self.position_dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.position_dirty = true;
    }

    pub(crate) fn store_world_position(&mut self, position: Vec3) {
        self.world_position = position;
        self.position_dirty = false;
    }
}
