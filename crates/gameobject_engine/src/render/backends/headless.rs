//! Headless rendering backend
//!
//! Records every draw call instead of presenting it. Text is "rasterized" into a
//! solid block sized from the glyph count and the font size, which is enough for
//! layout-agnostic tests and for running scenes without a window.

use std::sync::Arc;

use crate::assets::{Font, Image, ImageHandle};
use crate::render::api::{BackendError, BackendResult, Color, RenderBackend};

/// Width in pixels of one rasterized glyph, as a fraction of the font size
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// One recorded `render_image` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Screen X position
    pub x: f32,
    /// Screen Y position
    pub y: f32,
    /// Width of the drawn image
    pub width: u32,
    /// Height of the drawn image
    pub height: u32,
}

/// Backend that records draws and rasterizations in memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    draw_calls: Vec<DrawCall>,
    rasterized: Vec<String>,
    frames_presented: u64,
    fail_rasterization: bool,
    close_requested: bool,
}

impl HeadlessBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls recorded since the last `begin_frame`
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Every string passed to `rasterize_text`, in call order
    pub fn rasterized_text(&self) -> &[String] {
        &self.rasterized
    }

    /// Number of completed frames
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Make subsequent `rasterize_text` calls fail
    pub fn set_fail_rasterization(&mut self, fail: bool) {
        self.fail_rasterization = fail;
    }

    /// Ask the main loop to stop after the current frame
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }
}

impl RenderBackend for HeadlessBackend {
    fn render_image(&mut self, image: &Image, x: f32, y: f32) {
        self.draw_calls.push(DrawCall {
            x,
            y,
            width: image.width,
            height: image.height,
        });
    }

    fn rasterize_text(&mut self, font: &Font, text: &str, color: Color) -> BackendResult<ImageHandle> {
        if self.fail_rasterization {
            return Err(BackendError::TextRasterization(format!(
                "headless rasterizer disabled for '{}'",
                text
            )));
        }

        self.rasterized.push(text.to_owned());

        let glyph_width = (font.size as f32 * GLYPH_WIDTH_RATIO).ceil().max(1.0) as u32;
        let width = glyph_width * text.chars().count().max(1) as u32;
        let height = font.size.max(1);
        Ok(Arc::new(Image::solid_color(width, height, color.to_array())))
    }

    fn begin_frame(&mut self) {
        self.draw_calls.clear();
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_font() -> Font {
        Font::from_bytes("Lingua.otf", 36, Vec::new())
    }

    #[test]
    fn test_rasterize_sizes_by_glyph_count() {
        let mut backend = HeadlessBackend::new();
        let image = backend
            .rasterize_text(&test_font(), "FPS", Color::WHITE)
            .expect("rasterization should succeed");

        assert_eq!(image.height, 36);
        assert_eq!(image.width, 18 * 3);
        assert_eq!(backend.rasterized_text(), &["FPS".to_string()]);
    }

    #[test]
    fn test_rasterize_failure_is_reported() {
        let mut backend = HeadlessBackend::new();
        backend.set_fail_rasterization(true);

        let result = backend.rasterize_text(&test_font(), "x", Color::WHITE);
        assert!(matches!(result, Err(BackendError::TextRasterization(_))));
        assert!(backend.rasterized_text().is_empty());
    }

    #[test]
    fn test_begin_frame_clears_draws() {
        let mut backend = HeadlessBackend::new();
        let image = Image::solid_color(2, 2, [0, 0, 0, 255]);
        backend.render_image(&image, 1.0, 2.0);
        assert_eq!(backend.draw_calls().len(), 1);

        backend.present();
        backend.begin_frame();
        assert!(backend.draw_calls().is_empty());
        assert_eq!(backend.frames_presented(), 1);
    }
}
