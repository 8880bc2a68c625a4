//! Scene Manager - owns every scene and drives them each frame
//!
//! Scenes are kept in creation order. Every scene is updated and rendered each
//! frame; there is no notion of a single active scene.

use crate::ecs::SceneError;
use crate::foundation::time::FrameContext;
use crate::render::RenderBackend;
use crate::scene::{Scene, SceneStats};

/// Registry of named scenes
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: Vec<Scene>,
}

impl SceneManager {
    /// Create a manager without scenes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene and return it for population
    ///
    /// Names are not required to be unique; lookups return the oldest match.
    pub fn create_scene(&mut self, name: impl Into<String>) -> &mut Scene {
        let name = name.into();
        log::info!("Creating scene '{}'", name);
        let index = self.scenes.len();
        self.scenes.push(Scene::new(name));
        &mut self.scenes[index]
    }

    /// Scene named `name`
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.name() == name)
    }

    /// Mutable scene named `name`
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.name() == name)
    }

    /// Remove the scene named `name` together with all its entities
    pub fn remove_scene(&mut self, name: &str) -> Result<Scene, SceneError> {
        let index = self
            .scenes
            .iter()
            .position(|scene| scene.name() == name)
            .ok_or_else(|| SceneError::SceneNotFound(name.to_string()))?;
        log::info!("Removing scene '{}'", name);
        Ok(self.scenes.remove(index))
    }

    /// Scenes in creation order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether there are no scenes
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Update every scene
    ///
    /// All scenes are updated even if one fails; the first failure is returned.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        let mut first_error = None;
        for scene in &mut self.scenes {
            if let Err(err) = scene.update(ctx) {
                log::warn!("Scene '{}' update failed: {}", scene.name(), err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Render every scene, in creation order
    pub fn render(&mut self, backend: &mut dyn RenderBackend) {
        for scene in &mut self.scenes {
            scene.render(backend);
        }
    }

    /// Statistics summed over all scenes
    pub fn stats(&self) -> SceneStats {
        self.scenes
            .iter()
            .map(Scene::stats)
            .fold(SceneStats::default(), |mut total, stats| {
                total.entity_count += stats.entity_count;
                total.update_time_us += stats.update_time_us;
                total.render_time_us += stats.render_time_us;
                total.failed_updates += stats.failed_updates;
                total
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Image;
    use crate::ecs::components::RenderModule;
    use crate::ecs::Entity;
    use crate::render::HeadlessBackend;
    use std::sync::Arc;

    fn sprite(width: u32) -> Entity {
        let mut entity = Entity::new();
        entity.add_module(RenderModule::with_image(Arc::new(Image::solid_color(
            width,
            1,
            [0, 0, 0, 255],
        ))));
        entity
    }

    #[test]
    fn test_create_and_lookup() {
        let mut manager = SceneManager::new();
        manager.create_scene("Demo").add(Entity::new());
        manager.create_scene("Overlay");

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.scene("Demo").map(Scene::len), Some(1));
        assert!(manager.scene("Missing").is_none());
        assert!(manager.scene_mut("Overlay").is_some());
    }

    #[test]
    fn test_remove_unknown_scene() {
        let mut manager = SceneManager::new();
        let err = manager.remove_scene("Missing").unwrap_err();
        assert_eq!(err, SceneError::SceneNotFound("Missing".to_string()));
    }

    #[test]
    fn test_all_scenes_render_in_creation_order() {
        let mut manager = SceneManager::new();
        manager.create_scene("Background").add(sprite(10));
        manager.create_scene("Foreground").add(sprite(20));

        let mut backend = HeadlessBackend::new();
        {
            let mut ctx = FrameContext::new(0.016, &mut backend);
            manager.update(&mut ctx).unwrap();
        }
        manager.render(&mut backend);

        let widths: Vec<_> = backend.draw_calls().iter().map(|call| call.width).collect();
        assert_eq!(widths, vec![10, 20]);
        assert_eq!(manager.stats().entity_count, 2);

        manager.remove_scene("Background").unwrap();
        backend.begin_frame();
        manager.render(&mut backend);
        assert_eq!(backend.draw_calls().len(), 1);
    }
}
