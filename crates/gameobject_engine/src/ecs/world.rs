//! ECS World implementation
//!
//! The world is the arena that owns every entity. It is also where the scene
//! graph lives: parent/child edges, transform propagation along them, and the
//! per-entity update and render dispatch that needs access to more than one
//! entity at a time.

use slotmap::SlotMap;
use thiserror::Error;

use crate::ecs::components::{RenderModule, TransformModule};
use crate::ecs::module::{ModuleError, ModuleKind, ModuleKinds, ModuleType};
use crate::ecs::{Entity, EntityId};
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameContext;
use crate::render::RenderBackend;

/// Scene-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A module failed during its update
    #[error("{kind:?} module on entity {entity:?} failed: {source}")]
    ModuleUpdate {
        /// Entity owning the failing module
        entity: EntityId,
        /// Kind of the failing module
        kind: ModuleKind,
        /// What went wrong
        #[source]
        source: ModuleError,
    },

    /// The id does not refer to a live entity
    #[error("Entity {0:?} does not exist")]
    EntityNotFound(EntityId),

    /// No scene with the given name
    #[error("Scene '{0}' does not exist")]
    SceneNotFound(String),
}

impl SceneError {
    /// Underlying module error, for `ModuleUpdate`
    pub fn module_error(&self) -> Option<&ModuleError> {
        match self {
            Self::ModuleUpdate { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Arena of entities and the scene graph between them
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, Entity>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` and return its id
    ///
    /// The entity enters the world as a root.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        entity.parent = None;
        entity.children.clear();
        let id = self.entities.insert(entity);
        log::debug!("Spawned entity {:?}", id);
        id
    }

    /// Remove an entity from the world
    ///
    /// It is detached from its parent first; its children become roots and keep
    /// their world position.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let children = self.entities.get(id)?.children.clone();
        for child in children {
            self.set_parent(child, None, true);
        }
        self.set_parent(id, None, true);
        self.entities.remove(id)
    }

    /// Whether `id` refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids of all live entities, in arena order
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys()
    }

    /// Borrow an entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutably borrow an entity
    ///
    /// Graph edges can only be changed through the world's own methods. A
    /// transform attached here starts stale, but the entity's descendants keep
    /// their cached world positions; attach transforms to entities that have
    /// children through [`add_module`](Self::add_module).
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    // ------------------------------------------------------------------
    // Module registry
    // ------------------------------------------------------------------

    /// Attach a module to entity `id`, see [`Entity::add_module`]
    ///
    /// A newly attached transform, requested directly or as a dependency,
    /// invalidates the cached world positions of the whole subtree.
    pub fn add_module<T: ModuleType>(&mut self, id: EntityId, module: T) -> Option<&mut T> {
        let entity = self.entities.get_mut(id)?;
        let had_transform = entity.has_kind(ModuleKind::Transform);
        entity.add_module(module)?;

        if !had_transform && self.has_module::<TransformModule>(id) {
            self.mark_position_dirty(id);
        }
        self.entities.get_mut(id)?.get_module_mut::<T>()
    }

    /// First module of type `T` on entity `id`
    pub fn get_module<T: ModuleType>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(id)?.get_module::<T>()
    }

    /// Mutable access to the first module of type `T` on entity `id`
    pub fn get_module_mut<T: ModuleType>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(id)?.get_module_mut::<T>()
    }

    /// Whether entity `id` has a module of type `T`
    pub fn has_module<T: ModuleType>(&self, id: EntityId) -> bool {
        self.entities
            .get(id)
            .is_some_and(|entity| entity.has_module::<T>())
    }

    /// Mark modules of type `T` on entity `id` for removal
    pub fn remove_module<T: ModuleType>(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.remove_module::<T>();
        }
    }

    // ------------------------------------------------------------------
    // Scene graph
    // ------------------------------------------------------------------

    /// Parent of entity `id`
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id)?.parent
    }

    /// Children of entity `id`; empty for unknown ids
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities
            .get(id)
            .map(|entity| entity.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_descendant_of(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Move entity `id` under `new_parent`, or make it a root with `None`
    ///
    /// With `keep_world_position` the local position is rewritten so the world
    /// position does not change; otherwise the local position is kept and the
    /// entity moves with its new parent's frame.
    ///
    /// Requests that would make `id` its own parent, keep the current parent,
    /// or create a cycle are ignored.
    pub fn set_parent(&mut self, id: EntityId, new_parent: Option<EntityId>, keep_world_position: bool) {
        if !self.entities.contains_key(id) {
            log::trace!("set_parent on unknown entity {:?}", id);
            return;
        }
        if self.parent(id) == new_parent {
            log::trace!("{:?} already has parent {:?}", id, new_parent);
            return;
        }
        if let Some(parent) = new_parent {
            if parent == id || !self.entities.contains_key(parent) || self.is_descendant_of(parent, id) {
                log::trace!("Rejected reparent of {:?} under {:?}", id, parent);
                return;
            }
        }

        self.reparent(id, new_parent, keep_world_position);
    }

    /// Attach `child` under entity `id`; same rules as [`set_parent`](Self::set_parent)
    pub fn add_child(&mut self, id: EntityId, child: EntityId, keep_world_position: bool) {
        self.set_parent(child, Some(id), keep_world_position);
    }

    /// Detach `child` from entity `id`, making it a root
    ///
    /// Ignored unless `child` is currently a child of `id`.
    pub fn remove_child(&mut self, id: EntityId, child: EntityId, keep_world_position: bool) {
        if self.parent(child) != Some(id) {
            log::trace!("{:?} is not a child of {:?}", child, id);
            return;
        }
        self.set_parent(child, None, keep_world_position);
    }

    /// Validated reparent: position fix-up, dirty marking, then edge update
    fn reparent(&mut self, id: EntityId, new_parent: Option<EntityId>, keep_world_position: bool) {
        if keep_world_position && self.has_module::<TransformModule>(id) {
            let world = self.world_position(id).unwrap_or_else(Vec3::zeros);
            let parent_world = new_parent
                .and_then(|parent| self.world_position(parent))
                .unwrap_or_else(Vec3::zeros);
            if let Some(transform) = self.get_module_mut::<TransformModule>(id) {
                transform.set_local_position(world - parent_world);
            }
        }
        self.mark_position_dirty(id);

        let old_parent = self.parent(id);
        if let Some(old) = old_parent.and_then(|old| self.entities.get_mut(old)) {
            old.children.retain(|&child| child != id);
        }
        if let Some(parent) = new_parent.and_then(|parent| self.entities.get_mut(parent)) {
            parent.children.push(id);
        }
        if let Some(entity) = self.entities.get_mut(id) {
            entity.parent = new_parent;
        }

        log::debug!("Reparented {:?}: {:?} -> {:?}", id, old_parent, new_parent);
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Set the local position of entity `id`
    ///
    /// Marks the entity and its whole subtree dirty. Does nothing if the entity
    /// has no transform.
    pub fn set_local_position(&mut self, id: EntityId, position: Vec3) {
        match self.get_module_mut::<TransformModule>(id) {
            Some(transform) => transform.set_local_position(position),
            None => return,
        }
        self.mark_position_dirty(id);
    }

    /// Local position of entity `id`
    pub fn local_position(&self, id: EntityId) -> Option<Vec3> {
        self.get_module::<TransformModule>(id)
            .map(TransformModule::local_position)
    }

    /// World position of entity `id`, recomputed from the ancestors if stale
    ///
    /// A parent without a transform counts as the origin.
    pub fn world_position(&mut self, id: EntityId) -> Option<Vec3> {
        let entity = self.entities.get(id)?;
        let transform = entity.get_module::<TransformModule>()?;
        if !transform.is_dirty() {
            return Some(transform.cached_world_position());
        }

        let local = transform.local_position();
        let parent = entity.parent;
        let parent_world = match parent {
            Some(parent) => self.world_position(parent).unwrap_or_else(Vec3::zeros),
            None => Vec3::zeros(),
        };
        let world = parent_world + local;

        if let Some(transform) = self.get_module_mut::<TransformModule>(id) {
            transform.store_world_position(world);
        }
        Some(world)
    }

    /// Mark entity `id` and every descendant carrying a transform as dirty
    pub fn mark_position_dirty(&mut self, id: EntityId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(entity) = self.entities.get_mut(current) {
                if let Some(transform) = entity.get_module_mut::<TransformModule>() {
                    transform.mark_dirty();
                }
                pending.extend_from_slice(&entity.children);
            }
        }
    }

    // ------------------------------------------------------------------
    // Frame dispatch
    // ------------------------------------------------------------------

    /// Run one update pass over the modules of entity `id`
    ///
    /// Modules run in insertion order, including modules attached during the
    /// pass. Modules marked for removal are erased once the pass is over. A
    /// failing module does not stop the pass; the first failure is returned
    /// after it completes.
    pub fn update_entity(&mut self, id: EntityId, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        if !self.entities.contains_key(id) {
            return Err(SceneError::EntityNotFound(id));
        }

        let mut first_error = None;
        let mut index = 0;
        loop {
            let Some(entity) = self.entities.get_mut(id) else {
                break;
            };
            let Some(slot) = entity.modules.get_mut(index) else {
                break;
            };
            let kind = slot.kind;
            let Some(mut module) = slot.module.take() else {
                index += 1;
                continue;
            };

            let result = module.update(self, id, ctx);

            if let Some(slot) = self
                .entities
                .get_mut(id)
                .and_then(|entity| entity.modules.get_mut(index))
            {
                slot.module = Some(module);
            }

            if let Err(source) = result {
                log::error!("{:?} module on {:?} failed: {}", kind, id, source);
                if first_error.is_none() {
                    first_error = Some(SceneError::ModuleUpdate {
                        entity: id,
                        kind,
                        source,
                    });
                }
            }
            index += 1;
        }

        let removed = self
            .entities
            .get_mut(id)
            .map(Entity::purge_removed)
            .unwrap_or_default();
        if removed.contains(ModuleKinds::TRANSFORM) {
            self.mark_position_dirty(id);
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Draw entity `id` if it has a render module
    ///
    /// Children are not drawn; every entity that should appear is rendered
    /// on its own.
    pub fn render_entity(&self, id: EntityId, backend: &mut dyn RenderBackend) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let Some(render) = entity.get_module::<RenderModule>() else {
            return;
        };
        let position = entity
            .get_module::<TransformModule>()
            .map_or_else(Vec3::zeros, TransformModule::local_position);
        render.render(position, backend);
    }
}
