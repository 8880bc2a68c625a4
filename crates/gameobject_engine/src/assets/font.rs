//! Font resources
//!
//! A font is the raw font file plus the point size it was requested at. Turning
//! glyphs into pixels is the rendering backend's job.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::ResourceError;

/// Shared, immutable handle to a loaded font
pub type FontHandle = Arc<Font>;

/// A font file loaded at a specific size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Path the font was loaded from
    pub path: PathBuf,
    /// Point size
    pub size: u32,
    /// Raw font file contents
    pub data: Vec<u8>,
}

impl Font {
    /// Read a font file from disk
    pub fn from_file<P: AsRef<Path>>(path: P, size: u32) -> Result<Self, ResourceError> {
        let path_ref = path.as_ref();
        if size == 0 {
            return Err(ResourceError::InvalidFontSize {
                path: path_ref.to_path_buf(),
                size,
            });
        }

        let data = std::fs::read(path_ref).map_err(|source| ResourceError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;

        log::info!("Loaded font {:?} at size {} ({} bytes)", path_ref, size, data.len());
        Ok(Self::from_bytes(path_ref, size, data))
    }

    /// Wrap font data that is already in memory
    pub fn from_bytes(path: impl Into<PathBuf>, size: u32, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            size,
            data,
        }
    }
}
