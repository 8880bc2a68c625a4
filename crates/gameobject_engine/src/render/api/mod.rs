//! Public rendering API
//!
//! The backend trait and the plain data types that cross it.

pub mod render_backend;

pub use render_backend::{BackendError, BackendResult, Color, RenderBackend};
