//! Image loading utilities for drawable images
//!
//! Provides PNG (and any other format enabled on the `image` crate) loading into
//! the RGBA8 layout every backend consumes.

use std::path::Path;
use std::sync::Arc;

use crate::assets::ResourceError;

/// Shared, immutable handle to a drawable image
pub type ImageHandle = Arc<Image>;

/// Decoded image data ready for a backend to upload or draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Image {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|source| ResourceError::ImageDecode {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let img = image::load_from_memory(bytes).map_err(ResourceError::ImageBytes)?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self { data, width, height }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = Image::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = Image::from_bytes(b"definitely not a png");
        assert!(matches!(result, Err(ResourceError::ImageBytes(_))));
    }

    #[test]
    fn test_from_file_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let img = Image::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.data[0..4], &[1, 2, 3, 255]);
    }
}
