//! Text render module
//!
//! Keeps a string, a color and a font, and turns them into an image only when
//! one of them changed. The resulting image is handed to the entity's
//! [`RenderModule`], which does the actual drawing.

use crate::assets::FontHandle;
use crate::ecs::components::RenderModule;
use crate::ecs::module::{ModuleError, ModuleKind};
use crate::ecs::{EntityId, World};
use crate::foundation::time::FrameContext;
use crate::render::Color;

/// Text drawn through a sibling render module
#[derive(Debug, Clone)]
pub struct TextRenderModule {
    text: String,
    color: Color,
    font: FontHandle,
    needs_update: bool,
}

impl TextRenderModule {
    /// White text in `font`
    pub fn new(text: impl Into<String>, font: FontHandle) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            font,
            needs_update: true,
        }
    }

    /// Builder pattern: set the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Change the displayed text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.needs_update = true;
        }
    }

    /// Change the text color
    pub fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.color = color;
            self.needs_update = true;
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Font used for rasterization
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Whether the image is out of date with the text or color
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Re-rasterize if needed and give the image to the render module
    ///
    /// On failure the module stays out of date, so the next frame retries.
    pub(crate) fn update(
        &mut self,
        world: &mut World,
        owner: EntityId,
        ctx: &mut FrameContext<'_>,
    ) -> Result<(), ModuleError> {
        if !self.needs_update {
            return Ok(());
        }

        let image = ctx.renderer.rasterize_text(&self.font, &self.text, self.color)?;
        let render = world
            .get_module_mut::<RenderModule>(owner)
            .ok_or(ModuleError::MissingDependency(ModuleKind::Render))?;
        render.set_image(image);

        self.needs_update = false;
        Ok(())
    }
}
