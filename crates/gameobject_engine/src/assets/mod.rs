//! Asset management system
//!
//! Images and fonts shared between modules through the [`ResourceManager`].

pub mod font;
pub mod image_loader;
pub mod resource_manager;

pub use font::{Font, FontHandle};
pub use image_loader::{Image, ImageHandle};
pub use resource_manager::{ResourceError, ResourceManager, ResourceStats};
