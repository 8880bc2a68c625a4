//! Scene - ordered collection of entities driven once per frame
//!
//! A scene owns a [`World`] and the order its entities are updated and drawn
//! in. Children are not updated or drawn through their parent: every entity
//! added to the scene takes part in the frame on its own.

use std::time::Instant;

use crate::ecs::{Entity, EntityId, SceneError, World};
use crate::foundation::time::FrameContext;
use crate::render::RenderBackend;

/// Timing statistics of the last frame
#[derive(Debug, Clone, Default)]
pub struct SceneStats {
    /// Number of entities in the scene
    pub entity_count: usize,

    /// Time spent in the update pass (microseconds)
    pub update_time_us: u64,

    /// Time spent in the render pass (microseconds)
    pub render_time_us: u64,

    /// Module failures during the last update pass
    pub failed_updates: usize,
}

impl SceneStats {
    /// Calculate total frame time in microseconds
    pub fn total_frame_time_us(&self) -> u64 {
        self.update_time_us + self.render_time_us
    }
}

/// Named set of entities with a fixed update/render order
#[derive(Debug)]
pub struct Scene {
    name: String,
    world: World,
    order: Vec<EntityId>,
    stats: SceneStats,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: World::new(),
            order: Vec::new(),
            stats: SceneStats::default(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of `entity`; it is updated and rendered after every
    /// entity added before it
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = self.world.spawn(entity);
        self.order.push(id);
        id
    }

    /// Destroy an entity
    ///
    /// Its children stay in the scene as roots, at the same world position.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.world.despawn(id)?;
        self.order.retain(|&other| other != id);
        log::debug!("Removed {:?} from scene '{}'", id, self.name);
        Some(entity)
    }

    /// Destroy every entity
    pub fn remove_all(&mut self) {
        self.world = World::new();
        self.order.clear();
    }

    /// Entities in update/render order
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entity arena and scene graph
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity arena and scene graph
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Statistics of the last frame
    pub fn stats(&self) -> &SceneStats {
        &self.stats
    }

    /// Update every entity once, in order
    ///
    /// A failing module does not stop the pass. The first failure is returned
    /// once every entity has been updated.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        let start = Instant::now();
        let mut first_error = None;
        let mut failed = 0;

        for &id in &self.order {
            if let Err(err) = self.world.update_entity(id, ctx) {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        self.stats.entity_count = self.order.len();
        self.stats.failed_updates = failed;
        self.stats.update_time_us = start.elapsed().as_micros() as u64;

        first_error.map_or(Ok(()), Err)
    }

    /// Draw every entity that has a render module, in order
    pub fn render(&mut self, backend: &mut dyn RenderBackend) {
        let start = Instant::now();
        for &id in &self.order {
            self.world.render_entity(id, backend);
        }
        self.stats.render_time_us = start.elapsed().as_micros() as u64;
    }
}
