//! Behavior modules
//!
//! Each module type is one variant of [`Module`](crate::ecs::Module).

pub mod transform;
pub mod render;
pub mod text_render;
pub mod rotator;
pub mod fps_counter;

pub use transform::TransformModule;
pub use render::RenderModule;
pub use text_render::TextRenderModule;
pub use rotator::{RotatorModule, DEFAULT_ORBIT_RADIUS};
pub use fps_counter::{FpsCounterModule, FPS_UPDATE_INTERVAL};
