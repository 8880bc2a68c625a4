//! Backend abstraction traits for the rendering system
//!
//! The engine core never talks to a window or GPU directly. Everything it needs
//! from a renderer goes through the [`RenderBackend`] trait: drawing an image at
//! a screen position and rasterizing a string into an image.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{Font, Image, ImageHandle};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a rendering backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The font rasterizer could not produce a surface for the text
    #[error("Render text failed: {0}")]
    TextRasterization(String),

    /// A texture could not be created from a rasterized surface
    #[error("Create text texture from surface failed: {0}")]
    TextureCreation(String),

    /// Any other backend-specific failure
    #[error("Backend error: {0}")]
    Other(String),
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Create a color from its four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels as an array, in RGBA order
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Main rendering backend trait
///
/// Implemented by whatever owns the window. Calls happen on the engine thread,
/// once per frame: `begin_frame`, any number of draws, then `present`.
pub trait RenderBackend {
    /// Draw `image` with its top-left corner at screen position (`x`, `y`)
    fn render_image(&mut self, image: &Image, x: f32, y: f32);

    /// Rasterize `text` with `font` into a new drawable image
    fn rasterize_text(&mut self, font: &Font, text: &str, color: Color) -> BackendResult<ImageHandle>;

    /// Called before the render pass of a frame
    fn begin_frame(&mut self) {}

    /// Called after the render pass of a frame
    fn present(&mut self) {}

    /// Whether the backend wants the main loop to stop (window closed, etc.)
    fn should_close(&self) -> bool {
        false
    }
}
