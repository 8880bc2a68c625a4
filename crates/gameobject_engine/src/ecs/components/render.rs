//! Render module
//!
//! Draws a shared image at the owning entity's position.

use std::path::Path;

use crate::assets::{ImageHandle, ResourceError, ResourceManager};
use crate::foundation::math::Vec3;
use crate::render::RenderBackend;

/// Draws one image per frame
///
/// The draw uses the entity's **local** position, not its world position, so a
/// child entity is drawn relative to the screen origin rather than to its parent.
#[derive(Debug, Clone)]
pub struct RenderModule {
    image: Option<ImageHandle>,
    visible: bool,
}

impl Default for RenderModule {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderModule {
    /// Render module with no image; draws nothing until one is set
    pub fn new() -> Self {
        Self {
            image: None,
            visible: true,
        }
    }

    /// Render module drawing `image`
    pub fn with_image(image: ImageHandle) -> Self {
        Self {
            image: Some(image),
            visible: true,
        }
    }

    /// Replace the drawn image
    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = Some(image);
    }

    /// Load (or reuse) an image through the resource cache and draw it
    pub fn set_image_from_path(
        &mut self,
        resources: &mut ResourceManager,
        path: impl AsRef<Path>,
    ) -> Result<(), ResourceError> {
        self.image = Some(resources.load_image(path)?);
        Ok(())
    }

    /// Stop drawing any image
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Currently drawn image
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Show or hide without dropping the image
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the module is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Issue the draw call for this frame
    pub fn render(&self, position: Vec3, backend: &mut dyn RenderBackend) {
        if !self.visible {
            return;
        }
        if let Some(image) = &self.image {
            backend.render_image(image, position.x, position.y);
        }
    }
}
