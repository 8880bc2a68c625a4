//! # GameObject Engine
//!
//! A small game-object engine: entities composed from behavior modules and
//! arranged in a scene graph.
//!
//! ## Features
//!
//! - **Module registry**: one module of each kind per entity, typed access,
//!   automatic attachment of required modules, removal deferred to the end of
//!   the update pass
//! - **Scene graph**: reparenting with or without keeping the world position,
//!   lazy world positions with dirty propagation down the subtree
//! - **Behaviors**: image and text rendering, orbiting rotators, FPS display
//! - **Backend agnostic**: drawing and text rasterization go through
//!   [`RenderBackend`](render::RenderBackend)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gameobject_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     let counter = engine.fps_counter()?;
//!
//!     let scene = engine.scenes.create_scene("Demo");
//!     let mut fps = Entity::new();
//!     fps.add_module(counter);
//!     scene.add(fps);
//!
//!     let mut backend = HeadlessBackend::new();
//!     engine.run(&mut backend, Some(120));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod ecs;
pub mod assets;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError};
pub use crate::core::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError,
        config::Config,
        foundation::{
            math::Vec3,
            time::{FrameContext, Timer},
        },
        ecs::{Entity, EntityId, ModuleKind, SceneError, World},
        ecs::components::{
            FpsCounterModule, RenderModule, RotatorModule, TextRenderModule, TransformModule,
        },
        assets::{Font, FontHandle, Image, ImageHandle, ResourceManager},
        render::{Color, HeadlessBackend, RenderBackend},
        scene::{Scene, SceneManager},
    };
}
