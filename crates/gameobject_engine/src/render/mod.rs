//! # Rendering System
//!
//! The rendering abstraction layer of the engine. Modules only ever see the
//! [`RenderBackend`] trait; concrete renderers are provided by the application
//! or by [`backends::HeadlessBackend`].

pub mod api;

/// Rendering backend implementations
pub mod backends;

pub use api::{BackendError, BackendResult, Color, RenderBackend};
pub use backends::{DrawCall, HeadlessBackend};
