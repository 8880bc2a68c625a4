//! Resource Manager - shared image and font cache
//!
//! Images are cached by path, fonts by path and point size. Every caller that
//! asks for the same resource gets the same `Arc`, so a texture used by many
//! entities is decoded once and lives as long as its longest holder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::assets::{Font, FontHandle, Image, ImageHandle};

/// Resource Manager errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Reading a resource file failed
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An image file could not be decoded
    #[error("Failed to load image {path:?}: {source}")]
    ImageDecode {
        /// File that could not be decoded
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// In-memory image bytes could not be decoded
    #[error("Failed to load image from bytes: {0}")]
    ImageBytes(#[source] image::ImageError),

    /// Fonts must be requested at a positive size
    #[error("Invalid font size {size} for {path:?}")]
    InvalidFontSize {
        /// Requested font
        path: PathBuf,
        /// Requested size
        size: u32,
    },
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    /// Number of cached images
    pub images: usize,
    /// Number of cached fonts
    pub fonts: usize,
}

/// Central image and font cache
#[derive(Debug)]
pub struct ResourceManager {
    /// Directory relative resource paths are resolved against
    data_path: PathBuf,

    /// Cached images by resolved path
    images: HashMap<PathBuf, ImageHandle>,

    /// Cached fonts by resolved path and point size
    fonts: HashMap<(PathBuf, u32), FontHandle>,
}

impl ResourceManager {
    /// Create a resource manager rooted at `data_path`
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        log::info!("Resource manager using data path {:?}", data_path);
        Self {
            data_path,
            images: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Directory resources are loaded from
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_path.join(path)
        }
    }

    /// Load an image, or return the cached handle if it was loaded before
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<ImageHandle, ResourceError> {
        let full_path = self.resolve(path.as_ref());
        if let Some(image) = self.images.get(&full_path) {
            return Ok(Arc::clone(image));
        }

        let image = Arc::new(Image::from_file(&full_path)?);
        self.images.insert(full_path, Arc::clone(&image));
        Ok(image)
    }

    /// Load a font at `size`, or return the cached handle
    pub fn load_font(&mut self, path: impl AsRef<Path>, size: u32) -> Result<FontHandle, ResourceError> {
        let full_path = self.resolve(path.as_ref());
        let key = (full_path, size);
        if let Some(font) = self.fonts.get(&key) {
            return Ok(Arc::clone(font));
        }

        let font = Arc::new(Font::from_file(&key.0, size)?);
        self.fonts.insert(key, Arc::clone(&font));
        Ok(font)
    }

    /// Register an image that did not come from disk under `name`
    ///
    /// Later `load_image(name)` calls return this handle.
    pub fn insert_image(&mut self, name: impl AsRef<Path>, image: Image) -> ImageHandle {
        let handle = Arc::new(image);
        let key = self.resolve(name.as_ref());
        self.images.insert(key, Arc::clone(&handle));
        handle
    }

    /// Register an in-memory font under `name` and `size`
    pub fn insert_font(&mut self, name: impl AsRef<Path>, size: u32, data: Vec<u8>) -> FontHandle {
        let key = (self.resolve(name.as_ref()), size);
        let handle = Arc::new(Font::from_bytes(key.0.clone(), size, data));
        self.fonts.insert(key, Arc::clone(&handle));
        handle
    }

    /// Drop every cached resource nobody outside the cache holds anymore
    ///
    /// Returns the number of evicted entries.
    pub fn unload_unused(&mut self) -> usize {
        let before = self.images.len() + self.fonts.len();
        self.images.retain(|_, image| Arc::strong_count(image) > 1);
        self.fonts.retain(|_, font| Arc::strong_count(font) > 1);
        let evicted = before - (self.images.len() + self.fonts.len());
        if evicted > 0 {
            log::debug!("Unloaded {} unused resource(s)", evicted);
        }
        evicted
    }

    /// Current cache sizes
    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            images: self.images.len(),
            fonts: self.fonts.len(),
        }
    }
}
