//! Scenes and scene management
//!
//! A [`Scene`] owns a world of entities and drives them once per frame in the
//! order they were added. The [`SceneManager`] owns every scene and forwards
//! update and render calls to each of them.

mod scene;
mod scene_manager;

pub use scene::{Scene, SceneStats};
pub use scene_manager::SceneManager;
